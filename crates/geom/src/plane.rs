use glam::Vec3;

/// A plane described by a normalized normal and a point on the plane. The
/// scalar offset `c = normal . point` is cached for point tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    c: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            point: Vec3::ZERO,
            c: 0.0,
        }
    }
}

impl Plane {
    /// Builds a plane from a normal (normalized here; normalization is a
    /// no-op on the zero vector) and a point.
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        let mut plane = Self {
            point,
            ..Self::default()
        };
        plane.set_normal(normal);
        plane
    }

    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal.normalize_or_zero();
        self.recalc();
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn set_point(&mut self, point: Vec3) {
        self.point = point;
        self.recalc();
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Projects `pt` onto the plane.
    pub fn project_point(&self, pt: Vec3) -> Vec3 {
        pt - self.normal * (self.normal.dot(pt) - self.c)
    }

    /// Intersects a ray with the plane. Two-sided: `t` may be negative.
    /// Returns `None` when the ray is parallel to the plane.
    pub fn intersect_ray(&self, ray_start: Vec3, ray_direction: Vec3) -> Option<(Vec3, f32)> {
        let denom = self.normal.dot(ray_direction);
        if denom == 0.0 {
            return None;
        }
        let t = (self.c - self.normal.dot(ray_start)) / denom;
        Some((ray_start + ray_direction * t, t))
    }

    fn recalc(&mut self) {
        self.c = self.normal.dot(self.point);
    }
}
