//! Local object transform — spec §3.1.

use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
    pub pivot: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Transform { pos: Vec3::ZERO, rot: Quat::IDENTITY, scale: Vec3::ONE, pivot: Vec3::ZERO }
    }
}

impl Transform {
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_translation(self.pos)
            * Mat4::from_translation(self.pivot)
            * Mat4::from_quat(self.rot)
            * Mat4::from_scale(self.scale)
            * Mat4::from_translation(-self.pivot)
    }

    /// Euler angles in degrees, matching the scene-text `xform` key's
    /// `<rx,ry,rz>` third clause.
    #[must_use]
    pub fn with_euler_degrees(mut self, euler_deg: Vec3) -> Self {
        let r = euler_deg * std::f32::consts::PI / 180.0;
        self.rot = Quat::from_euler(glam::EulerRot::XYZ, r.x, r.y, r.z);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = Transform::default();
        assert_eq!(t.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_only_moves_origin() {
        let mut t = Transform::default();
        t.pos = Vec3::new(1.0, 2.0, 3.0);
        let p = t.to_mat4().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }
}
