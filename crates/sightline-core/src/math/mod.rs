//! Geometry types and the world-to-screen projection.

mod matrix;
mod projection;
mod vector;

pub use matrix::Matrix4x4;
pub use projection::{MIN_CLIP_W, Viewport, world_to_screen};
pub use vector::{Rect, Vector2, Vector3};
