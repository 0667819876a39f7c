use glam::{Vec2, Vec3};

use crate::parts::PartId;
use crate::registry::ManipId;

/// One intersection of a pick ray with a piece of a manipulator.
///
/// Parts fill in everything except `manip`, which is stamped by whoever
/// knows the owning manipulator (normally the manager while it walks a
/// window's manipulator list). `t` is the distance-like ray parameter the
/// manager uses to disambiguate between overlapping manipulators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitPoint {
    /// The manipulator that was intersected, once known.
    pub manip: Option<ManipId>,
    /// The sub-part that produced the intersection. Composite parts
    /// relabel their children's hits with their own id.
    pub part: PartId,
    pub ray_start: Vec3,
    pub ray_direction: Vec3,
    /// Parameter along the ray at which the intersection occurred.
    pub t: f32,
    /// The 3D intersection point.
    pub point: Vec3,
    /// Surface coordinates of the hit, for parts that have a natural 2D
    /// parameterization.
    pub uv: Option<Vec2>,
}
