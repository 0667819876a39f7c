use glam::{Mat3, Mat4, Vec3};

/// Errors raised when a primitive is handed geometry it cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomError {
    /// A direction or normal vector was the zero vector.
    ZeroVector,
}

impl std::fmt::Display for GeomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeomError::ZeroVector => write!(f, "direction must be a non-zero vector"),
        }
    }
}

impl std::error::Error for GeomError {}

/// Returns an arbitrary vector perpendicular to `src`, or `None` for the
/// zero vector. The result is not normalized.
pub fn perpendicular(src: Vec3) -> Option<Vec3> {
    if src == Vec3::ZERO {
        return None;
    }
    if src.x != 0.0 {
        if src.y != 0.0 {
            Some(Vec3::new(-src.y, src.x, 0.0))
        } else {
            Some(Vec3::new(-src.z, 0.0, src.x))
        }
    } else {
        Some(Vec3::X)
    }
}

/// Inverts a rigid transform (rotation plus translation only) by
/// transposing the upper-left 3x3 and rotating the negated translation.
/// Not valid for matrices carrying scale or shear.
pub fn rigid_inverse(m: Mat4) -> Mat4 {
    let rot = Mat3::from_mat4(m).transpose();
    let trans = m.w_axis.truncate();
    Mat4::from_cols(
        rot.x_axis.extend(0.0),
        rot.y_axis.extend(0.0),
        rot.z_axis.extend(0.0),
        (rot * -trans).extend(1.0),
    )
}

/// Sign convention shared by the quadrant tests: negative values map to
/// -1, everything else (zero included) to 1.
pub fn sign(value: f32) -> i32 {
    if value < 0.0 {
        -1
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn perpendicular_is_perpendicular() {
        for v in [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.3, 0.0, 0.7),
        ] {
            let p = perpendicular(v).unwrap();
            assert!(p.length_squared() > 0.0);
            assert!(v.dot(p).abs() < 1.0e-6);
        }
    }

    #[test]
    fn perpendicular_rejects_zero() {
        assert!(perpendicular(Vec3::ZERO).is_none());
    }

    #[test]
    fn rigid_inverse_round_trips() {
        let m = Mat4::from_rotation_translation(
            Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.7),
            Vec3::new(1.0, -2.0, 3.0),
        );
        let inv = rigid_inverse(m);
        let p = Vec3::new(0.5, 4.0, -1.5);
        let round_trip = inv.transform_point3(m.transform_point3(p));
        assert!((round_trip - p).length() < 1.0e-5);
    }

    #[test]
    fn zero_angle_rotation_is_a_noop() {
        for axis in [Vec3::X, Vec3::Y, Vec3::new(1.0, -2.0, 0.5).normalize()] {
            let rot = Quat::from_axis_angle(axis, 0.0);
            assert!((rot * axis - axis).length() < 1.0e-6);
            assert!((rot * Vec3::ONE - Vec3::ONE).length() < 1.0e-6);
        }
    }

    #[test]
    fn rotation_composed_with_inverse_is_identity() {
        let rot = Quat::from_axis_angle(Vec3::new(0.2, 1.0, -0.4).normalize(), 1.3);
        let composed = rot * rot.inverse();
        assert!(composed.dot(Quat::IDENTITY).abs() > 1.0 - 1.0e-6);
    }

    #[test]
    fn sign_treats_zero_as_positive() {
        assert_eq!(sign(0.0), 1);
        assert_eq!(sign(3.0), 1);
        assert_eq!(sign(-0.001), -1);
    }
}
