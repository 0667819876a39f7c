use glam::{Vec2, Vec3};

use crate::math::{perpendicular, GeomError};

/// One ray/plane intersection with the hit expressed both in 3-space and
/// in the plane's UV basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvHit {
    pub point: Vec3,
    pub t: f32,
    pub uv: Vec2,
}

/// A plane carrying an orthonormal in-plane basis, so 3D points on the
/// plane can be expressed as 2D coordinates. `u x v == normal` by
/// construction; normal, U and V are each normalized when set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneUv {
    origin: Vec3,
    normal: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
}

impl Default for PlaneUv {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            normal: Vec3::Y,
            u_axis: Vec3::X,
            v_axis: Vec3::NEG_Z,
        }
    }
}

impl PlaneUv {
    /// Builds a plane with a derived (arbitrary) UV basis.
    pub fn new(normal: Vec3, origin: Vec3) -> Result<Self, GeomError> {
        let mut plane = Self {
            origin,
            ..Self::default()
        };
        plane.set_normal(normal)?;
        Ok(plane)
    }

    /// Builds a plane from an explicit basis.
    pub fn with_uv(normal: Vec3, origin: Vec3, u_axis: Vec3, v_axis: Vec3) -> Result<Self, GeomError> {
        let mut plane = Self {
            origin,
            ..Self::default()
        };
        plane.set_normal_and_uv(normal, u_axis, v_axis)?;
        Ok(plane)
    }

    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Sets the normal and derives a perpendicular U axis and the matching
    /// V axis from it.
    pub fn set_normal(&mut self, normal: Vec3) -> Result<(), GeomError> {
        let u_axis = perpendicular(normal).ok_or(GeomError::ZeroVector)?;
        let v_axis = normal.cross(u_axis);
        self.set_normal_and_uv(normal, u_axis, v_axis)
    }

    pub fn set_normal_and_uv(
        &mut self,
        normal: Vec3,
        u_axis: Vec3,
        v_axis: Vec3,
    ) -> Result<(), GeomError> {
        if normal.length_squared() == 0.0
            || u_axis.length_squared() == 0.0
            || v_axis.length_squared() == 0.0
        {
            return Err(GeomError::ZeroVector);
        }
        self.normal = normal.normalize();
        self.u_axis = u_axis.normalize();
        self.v_axis = v_axis.normalize();
        Ok(())
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn u_axis(&self) -> Vec3 {
        self.u_axis
    }

    pub fn v_axis(&self) -> Vec3 {
        self.v_axis
    }

    /// Projects a point onto the plane, returning the projected point and
    /// its coordinates in the UV basis relative to the origin.
    pub fn project_point(&self, point: Vec3) -> (Vec3, Vec2) {
        let rel = point - self.origin;
        let in_plane = rel - self.normal * self.normal.dot(rel);
        let uv = Vec2::new(in_plane.dot(self.u_axis), in_plane.dot(self.v_axis));
        (self.origin + in_plane, uv)
    }

    /// Two-sided ray intersection reporting UV coordinates of the hit.
    /// Returns `None` when the ray is parallel to the plane.
    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3) -> Option<UvHit> {
        let denom = ray_direction.dot(self.normal);
        if denom == 0.0 {
            return None;
        }
        let t = (self.origin - ray_start).dot(self.normal) / denom;
        let point = ray_start + ray_direction * t;
        let rel = point - self.origin;
        let uv = Vec2::new(rel.dot(self.u_axis), rel.dot(self.v_axis));
        Some(UvHit { point, t, uv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal_and_right_handed() {
        let plane = PlaneUv::new(Vec3::new(0.3, 1.0, -0.2), Vec3::ZERO).unwrap();
        let (n, u, v) = (plane.normal(), plane.u_axis(), plane.v_axis());
        assert!((u.length() - 1.0).abs() < 1.0e-6);
        assert!((v.length() - 1.0).abs() < 1.0e-6);
        assert!(u.dot(v).abs() < 1.0e-6);
        assert!((u.cross(v) - n).length() < 1.0e-5);
    }

    #[test]
    fn intersect_reports_uv() {
        let plane = PlaneUv::with_uv(Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
        let hit = plane
            .intersect_ray(Vec3::new(2.0, -1.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
            .unwrap();
        assert!((hit.t - 5.0).abs() < 1.0e-6);
        assert!((hit.uv - Vec2::new(2.0, -1.0)).length() < 1.0e-6);
    }

    #[test]
    fn project_point_splits_off_normal_component() {
        let plane = PlaneUv::with_uv(Vec3::Z, Vec3::new(1.0, 1.0, 0.0), Vec3::X, Vec3::Y).unwrap();
        let (point, uv) = plane.project_point(Vec3::new(3.0, 2.0, 9.0));
        assert!((point - Vec3::new(3.0, 2.0, 0.0)).length() < 1.0e-6);
        assert!((uv - Vec2::new(2.0, 1.0)).length() < 1.0e-6);
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(PlaneUv::new(Vec3::ZERO, Vec3::ZERO).is_err());
    }
}
