use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Vector3;
use crate::process::{ByteBuffer, Pod};

/// Combined view-projection transform.
///
/// Remote layout: 16 little-endian `f32`, row-major (`m[row][col]`), 64 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix4x4 {
    pub m: [[f32; 4]; 4],
}

impl Matrix4x4 {
    pub const IDENTITY: Matrix4x4 = Matrix4x4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Dot product of `row` with the homogeneous point `[p, 1]`.
    pub fn row_dot(&self, row: usize, p: Vector3) -> f32 {
        let r = &self.m[row];
        r[0] * p.x + r[1] * p.y + r[2] * p.z + r[3]
    }
}

impl Pod for Matrix4x4 {
    const SIZE: usize = 64;

    fn decode(buf: &mut ByteBuffer<'_>) -> Result<Self> {
        let mut m = [[0.0f32; 4]; 4];
        for row in m.iter_mut() {
            for cell in row.iter_mut() {
                *cell = buf.read_f32()?;
            }
        }
        Ok(Self { m })
    }
}
