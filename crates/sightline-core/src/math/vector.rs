use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::process::{ByteBuffer, Pod};

/// Screen-space point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    /// Returned by the projection for points behind the camera.
    pub const OFFSCREEN: Vector2 = Vector2 { x: -1.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_offscreen(&self) -> bool {
        *self == Self::OFFSCREEN
    }
}

/// World-space point.
///
/// Remote layout: three consecutive little-endian `f32` (x, y, z), 12 bytes,
/// no padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Sum of absolute per-axis differences.
    pub fn taxicab_distance(&self, other: &Vector3) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }

    /// Copy of this point moved along the vertical axis.
    pub fn raised(&self, dz: f32) -> Vector3 {
        Vector3::new(self.x, self.y, self.z + dz)
    }
}

impl Pod for Vector3 {
    const SIZE: usize = 12;

    fn decode(buf: &mut ByteBuffer<'_>) -> Result<Self> {
        Ok(Self {
            x: buf.read_f32()?,
            y: buf.read_f32()?,
            z: buf.read_f32()?,
        })
    }
}

/// Axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxicab_distance() {
        let a = Vector3::new(1.0, -2.0, 3.0);
        let b = Vector3::new(-1.0, 2.0, 0.0);
        assert_eq!(a.taxicab_distance(&b), 9.0);
        assert_eq!(b.taxicab_distance(&a), 9.0);
        assert_eq!(a.taxicab_distance(&a), 0.0);
    }

    #[test]
    fn test_vector3_decode() {
        let mut data = Vec::new();
        for v in [1.5f32, -2.0, 64.25] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let mut buf = ByteBuffer::new(&data);
        let v = Vector3::decode(&mut buf).unwrap();
        assert_eq!(v, Vector3::new(1.5, -2.0, 64.25));
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_offscreen_sentinel() {
        assert!(Vector2::OFFSCREEN.is_offscreen());
        assert!(!Vector2::new(-1.0, 0.0).is_offscreen());
    }

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect {
            top: 100.0,
            left: 40.0,
            right: 90.0,
            bottom: 300.0,
        };
        assert_eq!(rect.width(), 50.0);
        assert_eq!(rect.height(), 200.0);
    }
}
