use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Per-window view parameters, supplied by the embedder once per frame (or
/// whenever the camera moves). The frustum is assumed to be a symmetric
/// perspective one; `vert_fov` is HALF of the vertical angular span, in
/// radians. `forward` and `up` must be orthogonal; that is the caller's
/// responsibility and is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParameters {
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
    pub vert_fov: f32,
    pub aspect: f32,
    pub viewport_px: [u32; 2],
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            vert_fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            viewport_px: [1, 1],
        }
    }
}

/// Converts pixel coordinates (origin top left, +Y down) to normalized
/// screen coordinates (origin center, +Y up, corners at +/-1).
pub fn pixel_to_normalized(params: &CameraParameters, px: f32, py: f32) -> Vec2 {
    let w = params.viewport_px[0].max(2) as f32;
    let h = params.viewport_px[1].max(2) as f32;
    Vec2::new(
        (px / (w - 1.0) - 0.5) * 2.0,
        (0.5 - py / (h - 1.0)) * 2.0,
    )
}

/// Strategy mapping normalized screen coordinates to a world-space ray.
/// Swappable so embedders with unusual frusta can supply their own.
pub trait ScreenToRayMapping {
    /// Returns the ray origin and direction, or `None` when the camera
    /// parameters are degenerate. The direction is not normalized.
    fn map_screen_to_ray(&self, screen: Vec2, params: &CameraParameters) -> Option<(Vec3, Vec3)>;
}

/// Default mapping for a symmetric perspective frustum (a right truncated
/// pyramid). The horizontal field of view is derived from the vertical one
/// and the image-plane aspect ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrustumMapping;

impl ScreenToRayMapping for FrustumMapping {
    fn map_screen_to_ray(&self, screen: Vec2, params: &CameraParameters) -> Option<(Vec3, Vec3)> {
        let forward = Vec3::from(params.forward);
        let up = Vec3::from(params.up);
        let right = forward.cross(up);
        if forward.length_squared() == 0.0
            || up.length_squared() == 0.0
            || right.length_squared() == 0.0
        {
            return None;
        }
        let forward = forward.normalize();
        let up = up.normalize();
        let right = right.normalize();
        let horiz_fov = (params.aspect * params.vert_fov.tan()).atan();
        let direction = forward
            + up * (params.vert_fov.tan() * screen.y)
            + right * (horiz_fov.tan() * screen.x);
        Some((Vec3::from(params.position), direction))
    }
}
