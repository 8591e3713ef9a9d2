mod collection;
mod loader;

pub use collection::OffsetTable;
pub use loader::{load_offsets, parse_hex_value, save_offsets};
