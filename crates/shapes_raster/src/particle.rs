//! Particle rendering — spec §4.7 "Particle rendering".
//!
//! Particle objects publish two parallel VBOs (position, color) plus a
//! point count; they draw after the mesh pass with a dedicated point
//! shader, sharing the shadow uniforms and light pool.

use glam::Vec3;

#[derive(Default)]
pub struct ParticleStream {
    positions: Vec<Vec3>,
    colors: Vec<u32>,
}

impl ParticleStream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
    }

    pub fn push(&mut self, position: Vec3, color: u32) {
        self.positions.push(position);
        self.colors.push(color);
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[must_use]
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
