use glam::Vec3;

/// One point along a ray: the 3D location and its ray parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPoint {
    pub point: Vec3,
    pub t: f32,
}

/// A bounding sphere. Radius zero means empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    center: Vec3,
    radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.radius == 0.0
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Grows this sphere to enclose `other`. A no-op when either sphere is
    /// empty. Concentric spheres take the larger radius.
    pub fn extend_by(&mut self, other: &BoundingSphere) {
        if self.radius == 0.0 || other.radius == 0.0 {
            return;
        }
        let diff = other.center - self.center;
        if diff.length_squared() == 0.0 {
            self.radius = self.radius.max(other.radius);
            return;
        }
        // Walk the line through both centers; the extreme intersection
        // points over both spheres span the merged sphere's diameter.
        let Some((a0, a1)) = self.intersect_ray(self.center, diff) else {
            return;
        };
        let Some((b0, b1)) = other.intersect_ray(self.center, diff) else {
            return;
        };
        let mut min = a0;
        let mut max = a0;
        for candidate in [a1, Some(b0), b1].into_iter().flatten() {
            if candidate.t < min.t {
                min = candidate;
            }
            if candidate.t > max.t {
                max = candidate;
            }
        }
        self.center = (min.point + max.point) * 0.5;
        self.radius = 0.5 * (max.point - min.point).length();
    }

    /// Intersects a ray with the sphere surface. Returns `None` when the
    /// ray misses (or its direction is the zero vector), one point for a
    /// tangent ray and two otherwise. Two-sided; `t` values may be
    /// negative.
    pub fn intersect_ray(
        &self,
        ray_start: Vec3,
        ray_direction: Vec3,
    ) -> Option<(RayPoint, Option<RayPoint>)> {
        let a = ray_direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * (ray_start.dot(ray_direction) - ray_direction.dot(self.center));
        let c = (self.center - ray_start).length_squared() - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t0 = 0.5 * (-b + root) / a;
        let first = RayPoint {
            point: ray_start + ray_direction * t0,
            t: t0,
        };
        if disc == 0.0 {
            return Some((first, None));
        }
        let t1 = 0.5 * (-b - root) / a;
        let second = RayPoint {
            point: ray_start + ray_direction * t1,
            t: t1,
        };
        Some((first, Some(second)))
    }
}
