use std::collections::HashMap;

use n2g_netlist::PortDirection;

use crate::identity::{BitLabel, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The node drives the bit.
    Source,
    /// The node consumes the bit.
    Target,
    SourceAndTarget,
}

impl Role {
    /// Role of a module port seen from inside the module: an input port
    /// feeds the module's logic, an output port is fed by it.
    pub fn for_module_port(dir: PortDirection) -> Self {
        match dir {
            PortDirection::Input => Role::Source,
            PortDirection::Output => Role::Target,
            PortDirection::Inout => Role::SourceAndTarget,
        }
    }

    /// Role of a cell for one of its connections. Unknown directions register nothing.
    pub fn for_cell_port(dir: Option<PortDirection>) -> Option<Self> {
        match dir? {
            PortDirection::Input => Some(Role::Target),
            PortDirection::Output => Some(Role::Source),
            PortDirection::Inout => Some(Role::SourceAndTarget),
        }
    }

    fn is_source(self) -> bool {
        matches!(self, Role::Source | Role::SourceAndTarget)
    }

    fn is_target(self) -> bool {
        matches!(self, Role::Target | Role::SourceAndTarget)
    }
}

#[derive(Debug, Default)]
struct Endpoints {
    sources: Vec<NodeId>,
    targets: Vec<NodeId>,
}

/// Drivers and consumers of every labelled bit, in registration order.
#[derive(Debug, Default)]
pub struct ConnectivityIndex {
    entries: HashMap<BitLabel, Endpoints>,
}

impl ConnectivityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, label: BitLabel, node: NodeId, role: Role) {
        let entry = self.entries.entry(label).or_default();
        if role.is_source() {
            entry.sources.push(node);
        }
        if role.is_target() {
            entry.targets.push(node);
        }
    }

    pub fn sources(&self, label: BitLabel) -> &[NodeId] {
        self.entries
            .get(&label)
            .map_or(&[][..], |entry| entry.sources.as_slice())
    }

    pub fn targets(&self, label: BitLabel) -> &[NodeId] {
        self.entries
            .get(&label)
            .map_or(&[][..], |entry| entry.targets.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::NodeAllocator;
    use n2g_netlist::State;

    #[test]
    fn port_roles_follow_direction() {
        assert_eq!(Role::for_module_port(PortDirection::Input), Role::Source);
        assert_eq!(Role::for_module_port(PortDirection::Output), Role::Target);
        assert_eq!(
            Role::for_module_port(PortDirection::Inout),
            Role::SourceAndTarget
        );
    }

    #[test]
    fn cell_roles_are_mirrored() {
        assert_eq!(
            Role::for_cell_port(Some(PortDirection::Input)),
            Some(Role::Target)
        );
        assert_eq!(
            Role::for_cell_port(Some(PortDirection::Output)),
            Some(Role::Source)
        );
        assert_eq!(
            Role::for_cell_port(Some(PortDirection::Inout)),
            Some(Role::SourceAndTarget)
        );
        assert_eq!(Role::for_cell_port(None), None);
    }

    #[test]
    fn registrations_keep_their_order() {
        let mut nodes = NodeAllocator::new();
        let (a, b, c) = (nodes.allocate(), nodes.allocate(), nodes.allocate());
        let label = BitLabel::Net(2);

        let mut index = ConnectivityIndex::new();
        index.register(label, c, Role::Target);
        index.register(label, a, Role::Source);
        index.register(label, b, Role::SourceAndTarget);
        index.register(label, a, Role::Target);

        assert_eq!(index.sources(label), &[a, b]);
        assert_eq!(index.targets(label), &[c, b, a]);
    }

    #[test]
    fn unknown_labels_have_no_endpoints() {
        let index = ConnectivityIndex::new();
        let label = BitLabel::Const(State::S1);
        assert!(index.sources(label).is_empty());
        assert!(index.targets(label).is_empty());
    }
}
