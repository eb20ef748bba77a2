pub mod bits;
pub mod celltypes;
pub mod module;
pub mod select;
pub mod sigmap;

pub use bits::{SigBit, State, WireId};
pub use celltypes::{CellDirections, CellTypes};
pub use module::{Cell, Design, Module, PortDirection, Process, Wire};
pub use select::{NameSelection, SelectAll, Selection, SelectionEntry};
pub use sigmap::{BitCanonicalizer, SigMap};

#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    #[error("duplicate wire `{wire}` in module `{module}`")]
    DuplicateWire { module: String, wire: String },
    #[error("wire `{wire}` not found in module `{module}`")]
    UnknownWire { module: String, wire: String },
    #[error("invalid selection entry `{0}`; expected `module` or `module/member`")]
    InvalidSelection(String),
}
