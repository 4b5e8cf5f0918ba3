//! Material render record — spec §3.5.
//!
//! Compact, GPU-facing, `#[repr(C)]` struct aligned for uniform-buffer
//! upload. Grounded on `original_source/src/prims/material.h` for field
//! semantics and `myth_resources::uniforms`'s `WgslType` alignment
//! discipline (vec3s padded to 16 bytes when followed by another field in
//! the same std140-ish block).

use bytemuck::{Pod, Zeroable};

/// Up to four texture asset ids a material may bind (diffuse, normal,
/// roughness/metallic, emissive — the concrete slot meaning is a backend
/// convention, not fixed here).
pub type TextureSlots = [i32; 4];

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialRecord {
    pub textures: TextureSlots,

    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub env: [f32; 4],
    pub shadow: [f32; 4],
    pub reflection: [f32; 4],
    pub refraction: [f32; 4],
    pub emission: [f32; 4],

    pub specular_power: f32,
    pub light_width: f32,
    pub shadow_bias: f32,
    pub reflection_width: f32,

    pub reflection_bias: f32,
    pub refraction_width: f32,
    pub refraction_bias: f32,
    pub refraction_ior: f32,

    pub displace0: [f32; 4],
    pub displace1: [f32; 4],
}

impl Default for MaterialRecord {
    fn default() -> Self {
        MaterialRecord {
            textures: [-1; 4],
            ambient: [0.1, 0.1, 0.1, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
            env: [0.0; 4],
            shadow: [0.0, 0.0, 0.0, 1.0],
            reflection: [0.0; 4],
            refraction: [0.0; 4],
            emission: [0.0; 4],
            specular_power: 32.0,
            light_width: 1.0,
            shadow_bias: 0.002,
            reflection_width: 0.0,
            reflection_bias: 0.0,
            refraction_width: 0.0,
            refraction_bias: 0.0,
            refraction_ior: 1.5,
            displace0: [0.0; 4],
            displace1: [0.0; 4],
        }
    }
}
