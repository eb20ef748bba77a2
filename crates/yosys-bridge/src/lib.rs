pub mod bits;
pub mod loader;
mod module;

pub use bits::{parse_bits, RawBit};
pub use loader::{load_yosys_json, parse_yosys_json};
