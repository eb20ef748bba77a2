//! GML export of bit-level netlists.
//!
//! Every module port and cell instance becomes a node. Every driver/consumer
//! pair sharing a canonical signal bit becomes an edge, so two cells joined
//! through several bits are joined by several edges.

use std::io::Write;

use n2g_netlist::{CellTypes, Design};

pub mod emit;
pub mod error;
pub mod escape;
pub mod identity;
pub mod index;
pub mod writer;

pub use emit::{Edge, EdgeEmitter};
pub use error::GmlError;
pub use escape::quote;
pub use identity::{BitLabel, NodeAllocator, NodeId, SignalIdentityTable, RESERVED_BASE};
pub use index::{ConnectivityIndex, Role};
pub use writer::{GmlOptions, GmlStats, GmlWriter};

/// Writes `design` as one GML graph, resolving cell port directions from the
/// built-in cell library and the design's own modules.
pub fn write_gml<W: Write>(
    design: &Design,
    out: W,
    options: GmlOptions,
) -> Result<GmlStats, GmlError> {
    let cell_types = CellTypes::for_design(design);
    GmlWriter::new(out, options).write_design(design, &cell_types)
}
