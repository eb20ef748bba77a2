use std::collections::HashMap;

use crate::module::{Design, Module, PortDirection};

/// Answers which way a named port of a cell type points. `None` means the
/// type or port is unknown.
pub trait CellDirections {
    fn direction(&self, cell_type: &str, port: &str) -> Option<PortDirection>;
}

const UNARY: &[&str] = &[
    "$not", "$pos", "$neg", "$reduce_and", "$reduce_or", "$reduce_xor", "$reduce_xnor",
    "$reduce_bool", "$logic_not", "$slice", "$lut", "$sop",
];

const BINARY: &[&str] = &[
    "$and", "$or", "$xor", "$xnor", "$shl", "$shr", "$sshl", "$sshr", "$shift", "$shiftx", "$lt",
    "$le", "$eq", "$ne", "$eqx", "$nex", "$ge", "$gt", "$add", "$sub", "$mul", "$div", "$mod",
    "$divfloor", "$modfloor", "$pow", "$logic_and", "$logic_or", "$concat", "$macc",
];

const GATE_UNARY: &[&str] = &["$_BUF_", "$_NOT_"];

const GATE_BINARY: &[&str] = &[
    "$_AND_", "$_NAND_", "$_OR_", "$_NOR_", "$_XOR_", "$_XNOR_", "$_ANDNOT_", "$_ORNOT_",
];

// (type, inputs, outputs)
const FIXED: &[(&str, &[&str], &[&str])] = &[
    ("$mux", &["A", "B", "S"], &["Y"]),
    ("$pmux", &["A", "B", "S"], &["Y"]),
    ("$bwmux", &["A", "B", "S"], &["Y"]),
    ("$bmux", &["A", "S"], &["Y"]),
    ("$demux", &["A", "S"], &["Y"]),
    ("$tribuf", &["A", "EN"], &["Y"]),
    ("$alu", &["A", "B", "CI", "BI"], &["X", "Y", "CO"]),
    ("$fa", &["A", "B", "C"], &["X", "Y"]),
    ("$lcu", &["P", "G", "CI"], &["CO"]),
    ("$ff", &["D"], &["Q"]),
    ("$dff", &["CLK", "D"], &["Q"]),
    ("$dffe", &["CLK", "EN", "D"], &["Q"]),
    ("$adff", &["CLK", "ARST", "D"], &["Q"]),
    ("$adffe", &["CLK", "ARST", "EN", "D"], &["Q"]),
    ("$sdff", &["CLK", "SRST", "D"], &["Q"]),
    ("$sdffe", &["CLK", "SRST", "EN", "D"], &["Q"]),
    ("$sdffce", &["CLK", "SRST", "EN", "D"], &["Q"]),
    ("$aldff", &["CLK", "ALOAD", "AD", "D"], &["Q"]),
    ("$aldffe", &["CLK", "ALOAD", "AD", "EN", "D"], &["Q"]),
    ("$dffsr", &["CLK", "SET", "CLR", "D"], &["Q"]),
    ("$dffsre", &["CLK", "SET", "CLR", "EN", "D"], &["Q"]),
    ("$dlatch", &["EN", "D"], &["Q"]),
    ("$adlatch", &["EN", "ARST", "D"], &["Q"]),
    ("$dlatchsr", &["EN", "SET", "CLR", "D"], &["Q"]),
    ("$sr", &["SET", "CLR"], &["Q"]),
    ("$assert", &["A", "EN"], &[]),
    ("$assume", &["A", "EN"], &[]),
    ("$cover", &["A", "EN"], &[]),
    ("$_FF_", &["D"], &["Q"]),
    ("$_MUX_", &["A", "B", "S"], &["Y"]),
    ("$_NMUX_", &["A", "B", "S"], &["Y"]),
    ("$_AOI3_", &["A", "B", "C"], &["Y"]),
    ("$_OAI3_", &["A", "B", "C"], &["Y"]),
    ("$_AOI4_", &["A", "B", "C", "D"], &["Y"]),
    ("$_OAI4_", &["A", "B", "C", "D"], &["Y"]),
    ("$_TBUF_", &["A", "E"], &["Y"]),
];

const GATE_FLOP_PREFIXES: &[&str] = &["$_DFF", "$_SDFF", "$_ALDFF", "$_DLATCH", "$_SR_"];
const GATE_FLOP_INPUTS: &[&str] = &["C", "D", "E", "R", "S", "L", "AD"];

#[derive(Debug, Clone, Default)]
pub struct CellTypes {
    types: HashMap<String, HashMap<String, PortDirection>>,
}

impl CellTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in word-level and gate-level cell library.
    pub fn internals() -> Self {
        let mut types = Self::new();
        for kind in UNARY.iter().chain(GATE_UNARY) {
            types.register_ports(kind, &["A"], &["Y"]);
        }
        for kind in BINARY.iter().chain(GATE_BINARY) {
            types.register_ports(kind, &["A", "B"], &["Y"]);
        }
        for (kind, inputs, outputs) in FIXED {
            types.register_ports(kind, inputs, outputs);
        }
        types
    }

    /// Internal library, then module interfaces, then directions recorded on
    /// cells; later sources override earlier ones.
    pub fn for_design(design: &Design) -> Self {
        let mut types = Self::internals();
        for module in design.modules() {
            types.register_module(module);
        }
        for module in design.modules() {
            for cell in module.cells() {
                for (port, dir) in &cell.port_directions {
                    types.register(&cell.kind, port, *dir);
                }
            }
        }
        types
    }

    pub fn register(&mut self, cell_type: &str, port: &str, dir: PortDirection) {
        self.types
            .entry(cell_type.to_string())
            .or_default()
            .insert(port.to_string(), dir);
    }

    pub fn register_module(&mut self, module: &Module) {
        for &port in module.ports() {
            let wire = module.wire(port);
            if let Some(dir) = wire.port {
                self.register(&module.name, &wire.name, dir);
            }
        }
    }

    fn register_ports(&mut self, cell_type: &str, inputs: &[&str], outputs: &[&str]) {
        for port in inputs {
            self.register(cell_type, port, PortDirection::Input);
        }
        for port in outputs {
            self.register(cell_type, port, PortDirection::Output);
        }
    }
}

impl CellDirections for CellTypes {
    fn direction(&self, cell_type: &str, port: &str) -> Option<PortDirection> {
        let recorded = self.types.get(cell_type).and_then(|ports| ports.get(port));
        if let Some(dir) = recorded {
            return Some(*dir);
        }
        if is_gate_flop(cell_type) {
            if port == "Q" {
                return Some(PortDirection::Output);
            }
            if GATE_FLOP_INPUTS.contains(&port) {
                return Some(PortDirection::Input);
            }
        }
        None
    }
}

fn is_gate_flop(cell_type: &str) -> bool {
    GATE_FLOP_PREFIXES
        .iter()
        .any(|prefix| cell_type.starts_with(prefix))
}
