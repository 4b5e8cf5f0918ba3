//! Light render record — spec §3.5.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightRecord {
    pub position: [f32; 4],
    pub target: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub input_color: [f32; 4],
    pub shadow_color: [f32; 4],
    /// `(inner, mid, outer)` spot-cone angles in radians, `w` unused padding.
    pub cone: [f32; 4],
}

impl Default for LightRecord {
    fn default() -> Self {
        LightRecord {
            position: [0.0, 5.0, 5.0, 1.0],
            target: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.05, 0.05, 0.05, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
            input_color: [1.0, 1.0, 1.0, 1.0],
            shadow_color: [0.0, 0.0, 0.0, 1.0],
            cone: [0.0, 0.0, std::f32::consts::PI, 0.0],
        }
    }
}

impl LightRecord {
    #[must_use]
    pub fn direction(&self) -> glam::Vec3 {
        let pos = glam::Vec3::new(self.position[0], self.position[1], self.position[2]);
        let target = glam::Vec3::new(self.target[0], self.target[1], self.target[2]);
        (pos - target).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_points_from_target_to_light() {
        let mut l = LightRecord::default();
        l.position = [0.0, 5.0, 5.0, 1.0];
        l.target = [0.0, 0.0, 0.0, 1.0];
        let d = l.direction();
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
}
