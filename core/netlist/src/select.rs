use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use crate::module::Module;
use crate::NetlistError;

/// Predicate restricting which modules and which of their ports, cells and
/// wires take part in a translation.
pub trait Selection {
    fn selects_module(&self, module: &Module) -> bool;
    fn selects_member(&self, module: &Module, member: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAll;

impl Selection for SelectAll {
    fn selects_module(&self, _module: &Module) -> bool {
        true
    }

    fn selects_member(&self, _module: &Module, _member: &str) -> bool {
        true
    }
}

/// One `module` or `module/member` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub module: String,
    pub member: Option<String>,
}

impl FromStr for SelectionEntry {
    type Err = NetlistError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || NetlistError::InvalidSelection(value.to_string());
        match value.split_once('/') {
            Some((module, member)) => {
                if module.is_empty() || member.is_empty() || member.contains('/') {
                    return Err(invalid());
                }
                Ok(Self {
                    module: module.to_string(),
                    member: Some(member.to_string()),
                })
            }
            None if value.is_empty() => Err(invalid()),
            None => Ok(Self {
                module: value.to_string(),
                member: None,
            }),
        }
    }
}

/// Selection by exact name. A module named on its own is selected whole; a
/// module named only through `module/member` entries is partially selected.
#[derive(Debug, Clone, Default)]
pub struct NameSelection {
    // `None` marks a wholly selected module
    modules: BTreeMap<String, Option<BTreeSet<String>>>,
}

impl NameSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: SelectionEntry) {
        match entry.member {
            None => {
                self.modules.insert(entry.module, None);
            }
            Some(member) => {
                if let Some(members) = self
                    .modules
                    .entry(entry.module)
                    .or_insert_with(|| Some(BTreeSet::new()))
                {
                    members.insert(member);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<SelectionEntry> for NameSelection {
    fn from_iter<I: IntoIterator<Item = SelectionEntry>>(iter: I) -> Self {
        let mut selection = Self::new();
        for entry in iter {
            selection.add(entry);
        }
        selection
    }
}

impl Selection for NameSelection {
    fn selects_module(&self, module: &Module) -> bool {
        self.modules.contains_key(&module.name)
    }

    fn selects_member(&self, module: &Module, member: &str) -> bool {
        match self.modules.get(&module.name) {
            Some(None) => true,
            Some(Some(members)) => members.contains(member),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> SelectionEntry {
        text.parse().expect("parse selection entry")
    }

    #[test]
    fn parses_module_and_member_entries() {
        assert_eq!(
            entry("top"),
            SelectionEntry {
                module: "top".into(),
                member: None
            }
        );
        assert_eq!(
            entry("top/u0"),
            SelectionEntry {
                module: "top".into(),
                member: Some("u0".into())
            }
        );
        for bad in ["", "/u0", "top/", "a/b/c"] {
            assert!(bad.parse::<SelectionEntry>().is_err(), "accepted `{bad}`");
        }
    }

    #[test]
    fn whole_module_overrides_member_entries() {
        let selection: NameSelection = [entry("top/u0"), entry("top")].into_iter().collect();
        let top = Module::new("top");
        assert!(selection.selects_member(&top, "u1"));

        let selection: NameSelection = [entry("top"), entry("top/u0")].into_iter().collect();
        assert!(selection.selects_member(&top, "u1"));
    }

    #[test]
    fn partial_selection_only_picks_named_members() {
        let selection: NameSelection = [entry("top/u0"), entry("top/a")].into_iter().collect();
        let top = Module::new("top");
        let other = Module::new("other");

        assert!(selection.selects_module(&top));
        assert!(selection.selects_member(&top, "u0"));
        assert!(selection.selects_member(&top, "a"));
        assert!(!selection.selects_member(&top, "u1"));
        assert!(!selection.selects_module(&other));
        assert!(!selection.selects_member(&other, "u0"));
    }
}
