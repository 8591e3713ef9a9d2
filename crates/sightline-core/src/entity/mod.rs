//! Entity table traversal.
//!
//! One pass walks the remote entity table, resolves each controller to its
//! pawn, filters and projects what survives. Nothing is kept between passes.

mod bones;
pub mod layout;
mod name;
mod table;
mod types;
mod walker;

pub use bones::Bone;
pub use name::sanitize_name;
pub use table::EntityTable;
pub use types::{Entity, EntitySummary};
pub use walker::{EntityWalker, LocalPlayer};
