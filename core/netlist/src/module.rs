use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bits::{SigBit, WireId};
use crate::NetlistError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
    Inout,
}

impl PortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::Inout => "inout",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wire {
    pub name: String,
    pub width: u32,
    pub port: Option<PortDirection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub name: String,
    pub kind: String,
    pub connections: Vec<(String, Vec<SigBit>)>,
    /// Port directions recorded by whatever produced the netlist, if any.
    pub port_directions: BTreeMap<String, PortDirection>,
}

impl Cell {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            connections: Vec::new(),
            port_directions: BTreeMap::new(),
        }
    }

    pub fn connect(mut self, port: impl Into<String>, bits: Vec<SigBit>) -> Self {
        self.connections.push((port.into(), bits));
        self
    }

    pub fn with_direction(mut self, port: impl Into<String>, dir: PortDirection) -> Self {
        self.port_directions.insert(port.into(), dir);
        self
    }
}

/// Behavioural block that has not been lowered to cells yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    pub name: String,
}

#[derive(Clone, Debug, Default)]
pub struct Module {
    pub name: String,
    wires: Vec<Wire>,
    wire_lookup: HashMap<String, WireId>,
    ports: Vec<WireId>,
    cells: Vec<Cell>,
    connections: Vec<(Vec<SigBit>, Vec<SigBit>)>,
    processes: Vec<Process>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_wire(&mut self, name: impl Into<String>, width: u32) -> Result<WireId, NetlistError> {
        let name = name.into();
        if self.wire_lookup.contains_key(&name) {
            return Err(NetlistError::DuplicateWire {
                module: self.name.clone(),
                wire: name,
            });
        }
        let id = WireId(self.wires.len());
        self.wire_lookup.insert(name.clone(), id);
        self.wires.push(Wire {
            name,
            width,
            port: None,
        });
        Ok(id)
    }

    /// Flags an existing wire as a module port and appends it to the port list.
    pub fn add_port(&mut self, wire: WireId, dir: PortDirection) -> Result<(), NetlistError> {
        let entry = self
            .wires
            .get_mut(wire.index())
            .ok_or_else(|| NetlistError::UnknownWire {
                module: self.name.clone(),
                wire: format!("#{}", wire.index()),
            })?;
        if entry.port.replace(dir).is_none() {
            self.ports.push(wire);
        }
        Ok(())
    }

    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Records that `lhs` and `rhs` carry the same signal, bit for bit.
    pub fn connect(&mut self, lhs: Vec<SigBit>, rhs: Vec<SigBit>) {
        debug_assert_eq!(lhs.len(), rhs.len());
        self.connections.push((lhs, rhs));
    }

    pub fn add_process(&mut self, name: impl Into<String>) {
        self.processes.push(Process { name: name.into() });
    }

    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires
            .iter()
            .enumerate()
            .map(|(index, wire)| (WireId(index), wire))
    }

    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.index()]
    }

    pub fn wire_id(&self, name: &str) -> Option<WireId> {
        self.wire_lookup.get(name).copied()
    }

    /// Bits of a wire, LSB first.
    pub fn wire_bits(&self, id: WireId) -> Vec<SigBit> {
        (0..self.wire(id).width)
            .map(|offset| SigBit::wire(id, offset))
            .collect()
    }

    pub fn ports(&self) -> &[WireId] {
        &self.ports
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn connections(&self) -> &[(Vec<SigBit>, Vec<SigBit>)] {
        &self.connections
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn has_processes(&self) -> bool {
        !self.processes.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Design {
    modules: Vec<Module>,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.name == name)
    }
}
