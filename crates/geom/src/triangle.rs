use glam::{Mat3, Vec2, Vec3};

use crate::math::sign;

// Roundoff tolerance for the in-plane basis and the edge tests. Too large
// rejects valid triangles; too small lets nearly-degenerate triangles
// through to the 3x3 solve.
const EPSILON: f32 = 1.0e-3;

/// Outcome of a ray/triangle test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleHit {
    /// The ray pierces the triangle. Two-sided: `t` is negative when the
    /// triangle lies behind the ray origin; callers doing visible-surface
    /// picking must discard those themselves.
    Hit { point: Vec3, t: f32 },
    /// The ray's plane intersection falls outside the triangle.
    Miss,
    /// The triangle is degenerate (near-coincident vertices) or the
    /// system relating ray and plane is singular.
    Degenerate,
}

/// Intersects a ray with the triangle `(v0, v1, v2)`.
///
/// Builds an orthonormal basis in the triangle's plane via Gram-Schmidt,
/// solves the 3x3 system relating plane coordinates and the ray parameter,
/// then tests the intersection point against each edge's half-plane using
/// the opposite vertex as the inside reference.
pub fn intersect_ray_triangle(
    ray_origin: Vec3,
    ray_direction: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> TriangleHit {
    let origin = v0;
    let p2 = v1 - origin;
    let p3 = v2 - origin;

    if p2.length() < EPSILON {
        return TriangleHit::Degenerate;
    }
    let x_axis = p2.normalize();

    let mut y_axis = p3 - x_axis * x_axis.dot(p3);
    if y_axis.length() < EPSILON {
        return TriangleHit::Degenerate;
    }
    y_axis = y_axis.normalize();

    // Solve u*X + v*Y - t*D = P - O for (u, v, t).
    let a = Mat3::from_cols(x_axis, y_axis, -ray_direction);
    if a.determinant() == 0.0 {
        return TriangleHit::Degenerate;
    }
    let solution = a.inverse() * (ray_origin - origin);
    let w = Vec2::new(solution.x, solution.y);

    // Triangle corners in plane coordinates.
    let uv = [
        Vec2::ZERO,
        Vec2::new(p2.dot(x_axis), p2.dot(y_axis)),
        Vec2::new(p3.dot(x_axis), p3.dot(y_axis)),
    ];

    for i in 0..3 {
        if !approx_on_same_side(uv[i], uv[(i + 1) % 3], uv[(i + 2) % 3], w) {
            return TriangleHit::Miss;
        }
    }

    // Recover the 3D intersection point from the plane coordinates.
    let b = w.y / uv[2].y;
    let a_coord = (w.x - b * uv[2].x) / uv[1].x;
    TriangleHit::Hit {
        point: origin + p2 * a_coord + p3 * b,
        t: solution.z,
    }
}

/// Tests whether `test_a` and `test_b` lie on the same side of the line
/// through `line_a` and `line_b`. Points within `EPSILON` of the line count
/// as on it, which passes the test.
fn approx_on_same_side(line_a: Vec2, line_b: Vec2, test_a: Vec2, test_b: Vec2) -> bool {
    let den0 = line_b.x - line_a.x;
    if den0.abs() < EPSILON {
        // Vertical line; compare x offsets instead of slopes.
        let off_a = line_a.x - test_a.x;
        let off_b = line_a.x - test_b.x;
        if off_a.abs() < EPSILON || off_b.abs() < EPSILON {
            return true;
        }
        return sign(off_a) == sign(off_b);
    }

    let m = (line_b.y - line_a.y) / den0;
    let val_a = test_a.y - line_a.y - m * (test_a.x - line_a.x);
    let val_b = test_b.y - line_a.y - m * (test_b.x - line_a.x);
    if val_a.abs() < EPSILON || val_b.abs() < EPSILON {
        return true;
    }
    sign(val_a) == sign(val_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: Vec3 = Vec3::new(-1.0, -1.0, 0.0);
    const V1: Vec3 = Vec3::new(1.0, -1.0, 0.0);
    const V2: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    fn centroid() -> Vec3 {
        (V0 + V1 + V2) / 3.0
    }

    #[test]
    fn ray_at_centroid_hits_with_positive_t() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let dir = (centroid() - origin).normalize();
        match intersect_ray_triangle(origin, dir, V0, V1, V2) {
            TriangleHit::Hit { point, t } => {
                assert!(t > 0.0);
                assert!((point - centroid()).length() < 1.0e-4);
            }
            other => panic!("expected hit, got {:?}", other),
        }
    }

    #[test]
    fn reversed_ray_still_hits_with_negative_t() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let dir = (origin - centroid()).normalize();
        match intersect_ray_triangle(origin, dir, V0, V1, V2) {
            TriangleHit::Hit { t, .. } => assert!(t < 0.0),
            other => panic!("expected two-sided hit, got {:?}", other),
        }
    }

    #[test]
    fn point_outside_triangle_misses() {
        let origin = Vec3::new(5.0, 5.0, 5.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(
            intersect_ray_triangle(origin, dir, V0, V1, V2),
            TriangleHit::Miss
        );
    }

    #[test]
    fn coincident_vertices_are_degenerate() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let dir = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(
            intersect_ray_triangle(origin, dir, V0, V0, V2),
            TriangleHit::Degenerate
        );
        // Collinear vertices collapse the second basis vector.
        assert_eq!(
            intersect_ray_triangle(
                origin,
                dir,
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(2.0, 0.0, 0.0)
            ),
            TriangleHit::Degenerate
        );
    }

    #[test]
    fn hit_near_edge_is_tolerated() {
        // Aim exactly at the base edge midpoint; the epsilon edge test
        // accepts points on the line.
        let target = Vec3::new(0.0, -1.0, 0.0);
        let origin = Vec3::new(0.0, -1.0, 4.0);
        let dir = (target - origin).normalize();
        match intersect_ray_triangle(origin, dir, V0, V1, V2) {
            TriangleHit::Hit { point, .. } => {
                assert!((point - target).length() < 1.0e-3);
            }
            other => panic!("expected edge hit, got {:?}", other),
        }
    }
}
