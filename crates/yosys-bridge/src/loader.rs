use std::{fs, path::Path};

use anyhow::{anyhow, ensure, Context, Result};
use n2g_netlist::Design;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::module::{ModuleBuilder, RawModule};

#[derive(Debug, Deserialize)]
struct RawYosysJson {
    #[serde(default)]
    creator: Option<String>,
    modules: Option<Map<String, Value>>,
}

pub fn load_yosys_json(path: impl AsRef<Path>) -> Result<Design> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read Yosys JSON from {}", path.display()))?;
    parse_yosys_json(&text)
        .with_context(|| format!("failed to load Yosys JSON from {}", path.display()))
}

/// Modules, ports, cells and nets keep the order they have in the document.
pub fn parse_yosys_json(text: &str) -> Result<Design> {
    let raw: RawYosysJson = serde_json::from_str(text).context("malformed Yosys JSON")?;
    if let Some(creator) = &raw.creator {
        debug!(%creator, "parsing Yosys JSON");
    }

    let modules = raw
        .modules
        .ok_or_else(|| anyhow!("Yosys JSON is missing the `modules` map"))?;
    ensure!(!modules.is_empty(), "Yosys JSON does not contain any modules");

    let mut design = Design::new();
    for (name, value) in modules {
        let raw_module: RawModule = serde_json::from_value(value)
            .with_context(|| format!("module `{name}` is malformed"))?;
        let module = ModuleBuilder::new(&name).build(raw_module)?;
        debug!(
            module = %name,
            wires = module.wires().count(),
            ports = module.ports().len(),
            cells = module.cells().len(),
            "loaded module"
        );
        design.add_module(module);
    }

    Ok(design)
}
