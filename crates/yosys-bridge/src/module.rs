use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, bail, Context, Result};
use n2g_netlist::{Cell, Module, PortDirection, SigBit, WireId};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::bits::{parse_bits, RawBit};

#[derive(Debug, Deserialize)]
pub(crate) struct RawModule {
    pub(crate) ports: Option<Map<String, Value>>,
    pub(crate) cells: Option<Map<String, Value>>,
    pub(crate) netnames: Option<Map<String, Value>>,
    #[serde(default)]
    pub(crate) processes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawPort {
    direction: PortDirection,
    bits: Value,
}

#[derive(Debug, Deserialize)]
struct RawNet {
    bits: Value,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    port_directions: BTreeMap<String, PortDirection>,
    #[serde(default)]
    connections: Map<String, Value>,
}

/// Builds one host module from its `write_json` form. Net-bit ids are
/// turned into wire bits: the first wire bit carrying an id owns it, every
/// later one is connected to the owner.
pub struct ModuleBuilder<'a> {
    name: &'a str,
    module: Module,
    bit_owner: HashMap<u64, SigBit>,
}

impl<'a> ModuleBuilder<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            module: Module::new(name),
            bit_owner: HashMap::new(),
        }
    }

    pub(crate) fn build(mut self, raw: RawModule) -> Result<Module> {
        let netnames = raw
            .netnames
            .ok_or_else(|| anyhow!("module `{}` is missing `netnames`", self.name))?;
        let ports = raw
            .ports
            .ok_or_else(|| anyhow!("module `{}` is missing `ports`", self.name))?;
        let cells = raw
            .cells
            .ok_or_else(|| anyhow!("module `{}` is missing `cells`", self.name))?;

        for (name, value) in netnames {
            let net: RawNet = serde_json::from_value(value)
                .with_context(|| format!("net `{name}` in module `{}` is malformed", self.name))?;
            let bits = parse_bits(&net.bits).with_context(|| {
                format!("net `{name}` in module `{}` has invalid `bits`", self.name)
            })?;
            let wire = self.module.add_wire(name, width_of(&bits)?)?;
            self.bind_bits(wire, &bits);
        }

        for (name, value) in ports {
            let port: RawPort = serde_json::from_value(value)
                .with_context(|| format!("port `{name}` in module `{}` is malformed", self.name))?;
            let bits = parse_bits(&port.bits).with_context(|| {
                format!("port `{name}` in module `{}` has invalid `bits`", self.name)
            })?;
            let wire = match self.module.wire_id(&name) {
                Some(wire) => {
                    let width = self.module.wire(wire).width;
                    if width != width_of(&bits)? {
                        bail!(
                            "port `{name}` in module `{}` has {} bits but its net has {width}",
                            self.name,
                            bits.len()
                        );
                    }
                    wire
                }
                None => self.module.add_wire(name.as_str(), width_of(&bits)?)?,
            };
            self.bind_bits(wire, &bits);
            self.module.add_port(wire, port.direction)?;
        }

        for (name, value) in cells {
            let cell = self
                .build_cell(&name, value)
                .with_context(|| format!("failed to load cell `{name}` in module `{}`", self.name))?;
            self.module.add_cell(cell);
        }

        for name in raw.processes.keys() {
            self.module.add_process(name.as_str());
        }

        Ok(self.module)
    }

    fn build_cell(&self, name: &str, value: Value) -> Result<Cell> {
        let raw: RawCell = serde_json::from_value(value).context("malformed cell entry")?;
        let mut cell = Cell::new(name, raw.kind);
        cell.port_directions = raw.port_directions;
        for (port, bits_value) in &raw.connections {
            let bits = parse_bits(bits_value)
                .with_context(|| format!("connection `{port}` has invalid bits"))?;
            let resolved = bits
                .iter()
                .map(|bit| self.resolve(*bit))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("connection `{port}` cannot be resolved"))?;
            cell.connections.push((port.clone(), resolved));
        }
        Ok(cell)
    }

    fn bind_bits(&mut self, wire: WireId, bits: &[RawBit]) {
        for (offset, raw) in (0u32..).zip(bits) {
            let bit = SigBit::wire(wire, offset);
            match *raw {
                RawBit::Id(id) => match self.bit_owner.entry(id) {
                    Entry::Occupied(owner) => {
                        if *owner.get() != bit {
                            self.module.connect(vec![bit], vec![*owner.get()]);
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(bit);
                    }
                },
                RawBit::Const(state) => self.module.connect(vec![bit], vec![SigBit::Const(state)]),
            }
        }
    }

    fn resolve(&self, bit: RawBit) -> Result<SigBit> {
        match bit {
            RawBit::Id(id) => self
                .bit_owner
                .get(&id)
                .copied()
                .ok_or_else(|| anyhow!("bit id {id} is not carried by any net")),
            RawBit::Const(state) => Ok(SigBit::Const(state)),
        }
    }
}

fn width_of(bits: &[RawBit]) -> Result<u32> {
    u32::try_from(bits.len()).context("bit vector width exceeds supported range")
}
