use glam::{Mat4, Vec3};

/// Per-object placement: scale, Euler rotation in degrees, and position.
///
/// Consumed immediately to produce a model matrix; nothing is cached.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub scale: Vec3,
    /// Rotation about X, Y and Z in degrees.
    pub rotation_degrees: Vec3,
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Transform {
    #[inline]
    pub const fn new(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Self {
        Self { scale, rotation_degrees, position }
    }

    /// Returns the model matrix for this transform. See [`compose`].
    #[inline]
    pub fn compose(&self) -> Mat4 {
        compose(self.scale, self.rotation_degrees, self.position)
    }
}

/// Builds `Translate · RotateZ · RotateY · RotateX · Scale`.
///
/// Each axis rotation is built independently from its own angle; X is the
/// innermost rotation and therefore the first applied to geometry.
pub fn compose(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Mat4 {
    let rotation_x = Mat4::from_rotation_x(rotation_degrees.x.to_radians());
    let rotation_y = Mat4::from_rotation_y(rotation_degrees.y.to_radians());
    let rotation_z = Mat4::from_rotation_z(rotation_degrees.z.to_radians());

    Mat4::from_translation(position) * rotation_z * rotation_y * rotation_x * Mat4::from_scale(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn scale_rotate_z_translate_moves_known_point() {
        let m = compose(Vec3::new(2.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 90.0), Vec3::new(1.0, 0.0, 0.0));
        let p = m.transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), EPS), "got {p:?}");
    }

    #[test]
    fn matches_explicit_product() {
        let m = compose(Vec3::new(2.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 90.0), Vec3::new(1.0, 0.0, 0.0));
        let expected = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
            * Mat4::from_rotation_z(90f32.to_radians())
            * Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        assert!(m.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn x_rotation_applies_before_y() {
        // Rx(90) takes +Y to +Z, then Ry(90) takes +Z to +X.
        let m = compose(Vec3::ONE, Vec3::new(90.0, 90.0, 0.0), Vec3::ZERO);
        let p = m.transform_point3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::X, EPS), "got {p:?}");
    }

    #[test]
    fn y_rotation_applies_before_z() {
        // Ry(90) takes +Z to +X, then Rz(90) takes +X to +Y.
        let m = compose(Vec3::ONE, Vec3::new(0.0, 90.0, 90.0), Vec3::ZERO);
        let p = m.transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::Y, EPS), "got {p:?}");
    }

    #[test]
    fn scale_applies_before_rotation() {
        // Non-uniform scale along X must stretch the local axis, not the world one.
        let m = compose(Vec3::new(5.0, 0.7, 0.5), Vec3::new(0.0, 0.0, 90.0), Vec3::new(3.0, 1.5, 3.0));
        let p = m.transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 4.0, 3.0), EPS), "got {p:?}");
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn default_transform_is_identity() {
        assert!(Transform::default().compose().abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn negative_scale_mirrors() {
        let m = compose(Vec3::new(1.0, -0.4, 0.5), Vec3::ZERO, Vec3::new(-2.0, 5.4, 0.0));
        let p = m.transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(p.abs_diff_eq(Vec3::new(-2.0, 5.0, 0.0), EPS), "got {p:?}");
    }
}
