//! World-to-screen projection.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{Matrix4x4, Vector2, Vector3};

/// Points whose clip-space `w` falls below this are at or behind the camera.
pub const MIN_CLIP_W: f32 = 0.01;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size of the primary monitor.
    #[cfg(target_os = "windows")]
    pub fn primary_screen() -> Result<Self> {
        use windows::Win32::UI::WindowsAndMessaging::{
            GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN,
        };

        // SAFETY: GetSystemMetrics only reads system configuration values.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        if width <= 0 || height <= 0 {
            return Err(crate::error::Error::Decode(format!(
                "Invalid screen metrics: {}x{}",
                width, height
            )));
        }
        Ok(Self::new(width as f32, height as f32))
    }

    #[cfg(not(target_os = "windows"))]
    pub fn primary_screen() -> Result<Self> {
        Err(crate::error::Error::Decode(
            "Windows only: screen metrics not available on this platform".to_string(),
        ))
    }
}

/// Project a world-space point to pixel coordinates.
///
/// Rows 0, 1 and 3 of `matrix` give clip-space x, y and w. Points with
/// `w < MIN_CLIP_W` return [`Vector2::OFFSCREEN`]. Screen y grows downward,
/// so clip y is negated.
pub fn world_to_screen(matrix: &Matrix4x4, point: Vector3, viewport: &Viewport) -> Vector2 {
    let w = matrix.row_dot(3, point);
    if w < MIN_CLIP_W {
        return Vector2::OFFSCREEN;
    }

    let inv_w = 1.0 / w;
    let ndc_x = matrix.row_dot(0, point) * inv_w;
    let ndc_y = matrix.row_dot(1, point) * inv_w;

    Vector2 {
        x: viewport.width / 2.0 + 0.5 * ndc_x * viewport.width + 0.5,
        y: viewport.height / 2.0 - 0.5 * ndc_y * viewport.height + 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    /// w = z, looking down +z.
    fn camera() -> Matrix4x4 {
        Matrix4x4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    #[test]
    fn test_identity_origin_800x600() {
        let viewport = Viewport::new(800.0, 600.0);
        let p = world_to_screen(&Matrix4x4::IDENTITY, Vector3::default(), &viewport);
        assert_eq!(p, Vector2::new(400.5, 300.5));
    }

    #[test]
    fn test_behind_camera_is_sentinel() {
        let viewport = Viewport::new(1920.0, 1080.0);
        for z in [-100.0, -1.0, 0.0, 0.009] {
            let p = world_to_screen(&camera(), Vector3::new(3.0, 4.0, z), &viewport);
            assert_eq!(p, Vector2::OFFSCREEN, "z = {}", z);
        }
    }

    #[test]
    fn test_w_at_threshold_projects() {
        let viewport = Viewport::new(800.0, 600.0);
        let p = world_to_screen(&camera(), Vector3::new(0.0, 0.0, MIN_CLIP_W), &viewport);
        assert!(!p.is_offscreen());
    }

    #[test]
    fn test_point_ahead_lands_at_centre() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let p = world_to_screen(&camera(), Vector3::new(0.0, 0.0, 250.0), &viewport);
        assert!((p.x - 960.0).abs() <= 0.5 + EPS);
        assert!((p.y - 540.0).abs() <= 0.5 + EPS);
    }

    #[test]
    fn test_perspective_divide_and_y_flip() {
        let viewport = Viewport::new(800.0, 600.0);
        let right = world_to_screen(&camera(), Vector3::new(5.0, 0.0, 10.0), &viewport);
        assert!((right.x - 600.5).abs() < EPS);

        let up = world_to_screen(&camera(), Vector3::new(0.0, 5.0, 10.0), &viewport);
        // Positive clip y is above centre
        assert!((up.y - 150.5).abs() < EPS);
    }
}
