use glam::Vec3;

use crate::math::GeomError;

/// An infinite line: a point plus a normalized direction. The component of
/// `point` perpendicular to the direction is cached for fast projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    point: Vec3,
    direction: Vec3,
    along: Vec3,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            direction: Vec3::X,
            along: Vec3::ZERO,
        }
    }
}

impl Line {
    /// Builds a line through `point` along `direction`. The direction is
    /// normalized; the zero vector is rejected.
    pub fn new(direction: Vec3, point: Vec3) -> Result<Self, GeomError> {
        let mut line = Self {
            point,
            ..Self::default()
        };
        line.set_direction(direction)?;
        Ok(line)
    }

    pub fn set_direction(&mut self, direction: Vec3) -> Result<(), GeomError> {
        if direction.length_squared() == 0.0 {
            return Err(GeomError::ZeroVector);
        }
        self.direction = direction.normalize();
        self.recalc();
        Ok(())
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_point(&mut self, point: Vec3) {
        self.point = point;
        self.recalc();
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Projects `pt` onto the line.
    pub fn project_point(&self, pt: Vec3) -> Vec3 {
        self.direction * self.direction.dot(pt) + self.along
    }

    /// Returns the point on this line closest to the given ray, or `None`
    /// when the two are parallel. If the closest approach lies behind the
    /// ray start the ray start itself is returned instead of extrapolating.
    pub fn closest_point_to_ray(&self, ray_start: Vec3, ray_direction: Vec3) -> Option<Vec3> {
        // Minimize |(p + s*d) - (o + t*r)|^2 over (s, t); the stationary
        // point solves a symmetric 2x2 system.
        let a00 = -self.direction.length_squared();
        let a11 = -ray_direction.length_squared();
        let a01 = self.direction.dot(ray_direction);
        let det = a00 * a11 - a01 * a01;
        if det == 0.0 {
            return None;
        }
        let b0 = self.point.dot(self.direction) - ray_start.dot(self.direction);
        let b1 = ray_start.dot(ray_direction) - self.point.dot(ray_direction);
        let s = (b0 * a11 - b1 * a01) / det;
        let t = (a00 * b1 - a01 * b0) / det;
        if t < 0.0 {
            // Ray start is the closest the ray gets.
            Some(ray_start)
        } else {
            Some(self.point + self.direction * s)
        }
    }

    fn recalc(&mut self) {
        self.along = self.point - self.direction * self.point.dot(self.direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_direction() {
        assert!(Line::new(Vec3::ZERO, Vec3::ZERO).is_err());
        let mut line = Line::default();
        assert!(line.set_direction(Vec3::ZERO).is_err());
        assert_eq!(line.direction(), Vec3::X);
    }

    #[test]
    fn project_point_lands_on_line() {
        let line = Line::new(Vec3::X, Vec3::new(0.0, 2.0, 0.0)).unwrap();
        let proj = line.project_point(Vec3::new(3.0, 7.0, -4.0));
        assert!((proj - Vec3::new(3.0, 2.0, 0.0)).length() < 1.0e-6);
    }

    #[test]
    fn closest_point_to_crossing_ray() {
        let line = Line::new(Vec3::X, Vec3::new(0.5, 0.0, 0.0)).unwrap();
        let closest = line
            .closest_point_to_ray(Vec3::new(3.5, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert!((closest - Vec3::new(3.5, 0.0, 0.0)).length() < 1.0e-5);
    }

    #[test]
    fn parallel_ray_reports_failure() {
        let line = Line::new(Vec3::X, Vec3::ZERO).unwrap();
        assert!(line
            .closest_point_to_ray(Vec3::new(0.0, 1.0, 0.0), Vec3::X)
            .is_none());
    }

    #[test]
    fn behind_ray_clamps_to_ray_start() {
        let line = Line::new(Vec3::X, Vec3::ZERO).unwrap();
        // The ray points away from the line; the closest approach would
        // need a negative ray parameter.
        let start = Vec3::new(0.0, 1.0, 0.0);
        let closest = line
            .closest_point_to_ray(start, Vec3::new(0.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(closest, start);
    }
}
