//! Memory layout constants for the remote entity structures
//!
//! # Entity table
//!
//! The entity list is a two-level paged array. The first level is a table of
//! page pointers, the second a page of fixed-size slots whose first word is
//! the entity pointer.
//!
//! ```text
//! list + 0x10 + 8 * ((raw & 0x7FFF) >> 9)   → page pointer
//! page + 120 * (raw & 0x1FF)                → entity pointer
//! ```
//!
//! Controllers are looked up with the loop counter as `raw`; pawns with the
//! handle stored in the controller.
//!
//! # Bone array
//!
//! ```text
//! Offset         Field        Size
//! ─────────────────────────────────
//! 32 * i + 0x00  position     12   (3 × f32, world space)
//! 32 * i + 0x0C  (rotation)   20
//! ```

/// Mask applied to a raw index or handle before paging.
pub const INDEX_MASK: u64 = 0x7FFF;

/// `raw >> PAGE_SHIFT` selects the page.
pub const PAGE_SHIFT: u32 = 9;

/// Width of one page pointer.
pub const PAGE_STRIDE: u64 = 8;

/// Page pointers start after this header.
pub const PAGE_TABLE_HEADER: u64 = 0x10;

/// `raw & SLOT_MASK` selects the slot within a page.
pub const SLOT_MASK: u64 = 0x1FF;

/// Size of one slot.
pub const SLOT_STRIDE: u64 = 120;

/// Size of one bone transform.
pub const BONE_STRIDE: u64 = 32;

/// Vertical offsets (world units) used to size the head marker.
pub const HEAD_TOP_OFFSET: f32 = 7.0;
pub const HEAD_BOTTOM_OFFSET: f32 = -5.0;

/// Height above the origin used as the top of the bounding box.
pub const BOX_TOP_OFFSET: f32 = 70.0;

/// Bounding box width is this fraction of its height on each side of the feet.
pub const BOX_HALF_WIDTH_RATIO: f32 = 0.25;
