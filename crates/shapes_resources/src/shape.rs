//! The per-instance [`Shape`] record — spec §3.2.
//!
//! Fixed layout, transmitted to the GPU as a structured vertex attribute
//! stream. Grounded on `original_source/src/prims/shapes.h`'s `Shape`
//! struct; field names and semantics are kept, the hand-written `Clear()`
//! constructor becomes `Default`, and `getXform()` becomes [`Shape::local_xform`].

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Mat4, Quat, Vec3, Vec4};

/// Shape classification. `ShapeKind::ShapeGroup` means `meshids.x` names
/// another shape container rather than a mesh — the sort traversal
/// recurses into it (spec §3.2, §4.5 Phase 1 step 1).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(i8)]
pub enum ShapeKind {
    #[default]
    None = -1,
    Point = 1,
    Image = 2,
    Mesh = 3,
    ShapeGroup = 4,
    Billboard2D = 5,
    Billboard3D = 6,
}

impl ShapeKind {
    #[must_use]
    pub fn from_raw(raw: i8) -> Self {
        match raw {
            1 => ShapeKind::Point,
            2 => ShapeKind::Image,
            3 => ShapeKind::Mesh,
            4 => ShapeKind::ShapeGroup,
            5 => ShapeKind::Billboard2D,
            6 => ShapeKind::Billboard3D,
            _ => ShapeKind::None,
        }
    }
}

/// Sentinel texture/material index meaning "unassigned" — the reference's
/// `NULL_NDX` (`max of ushort`).
pub const NULL_NDX: u16 = 65535;

/// The 16-field per-instance record. `#[repr(C)]` + `Pod` so the whole
/// struct can be memcpy'd straight into a GPU vertex buffer; field order
/// matches the table in spec §3.2 so the byte offsets below stay meaningful
/// without reshuffling.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Shape {
    pub pos: [f32; 3],
    pub rot: [f32; 4],
    pub scale: [f32; 3],
    pub pivot: [f32; 3],
    pub ids: [f32; 4],
    /// Low half (`[0..4]`): material asset id per slot. High half
    /// (`[4..8]`): backend-resolved index per slot, cached lazily by
    /// `shapes_render::resolve`.
    pub matids: [u16; 8],
    /// `{mesh_id, shader_id, face_count_or_0, face_offset_or_0}`.
    pub meshids: [f32; 4],
    /// `(u0, v0, du, dv)`.
    pub texsub: [f32; 4],
    pub clr: u32,
    pub kind: i8,
    pub invisible: i8,
    pub lod: u8,
    _pad: u8,
}

impl Default for Shape {
    fn default() -> Self {
        Shape {
            pos: [0.0; 3],
            rot: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            pivot: [0.0; 3],
            ids: [0.0; 4],
            matids: [NULL_NDX; 8],
            meshids: [-1.0, 0.0, 0.0, 0.0],
            texsub: [0.0, 0.0, 1.0, 1.0],
            clr: pack_rgba(1.0, 1.0, 1.0, 1.0),
            kind: ShapeKind::None as i8,
            invisible: 0,
            lod: 0,
            _pad: 0,
        }
    }
}

/// Packs four `[0,1]` floats into the reference's `COLORA` `u32` (RGBA8).
#[must_use]
pub fn pack_rgba(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
    c(r) | (c(g) << 8) | (c(b) << 16) | (c(a) << 24)
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        ShapeKind::from_raw(self.kind)
    }

    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind as i8;
    }

    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.invisible != 0
    }

    pub fn set_invisible(&mut self, invisible: bool) {
        self.invisible = i8::from(invisible);
    }

    #[must_use]
    pub fn mesh_id(&self) -> i32 {
        self.meshids[0] as i32
    }

    pub fn set_mesh_id(&mut self, id: i32) {
        self.meshids[0] = id as f32;
    }

    #[must_use]
    pub fn shader_id(&self) -> i32 {
        self.meshids[1] as i32
    }

    pub fn set_shader_id(&mut self, id: i32) {
        self.meshids[1] = id as f32;
    }

    #[must_use]
    pub fn material_asset_id(&self, slot: usize) -> u16 {
        self.matids[slot]
    }

    pub fn set_material_asset_id(&mut self, slot: usize, id: u16) {
        self.matids[slot] = id;
    }

    #[must_use]
    pub fn material_backend_index(&self, slot: usize) -> u16 {
        self.matids[4 + slot]
    }

    pub fn set_material_backend_index(&mut self, slot: usize, idx: u16) {
        self.matids[4 + slot] = idx;
    }

    /// Rotation-translation-scale-pivot transform as `TRST` composes it in
    /// the reference: `T(pos) * R(rot) * S(scale) * T(pivot)`.
    #[must_use]
    pub fn local_xform(&self) -> Mat4 {
        let rot = Quat::from_xyzw(self.rot[0], self.rot[1], self.rot[2], self.rot[3]);
        let affine = Affine3A::from_scale_rotation_translation(
            Vec3::from(self.scale),
            rot,
            Vec3::from(self.pos),
        );
        let pivot = Mat4::from_translation(Vec3::from(self.pivot));
        Mat4::from(affine) * pivot
    }

    #[must_use]
    pub fn ids_vec4(&self) -> Vec4 {
        Vec4::from(self.ids)
    }
}

/// Byte offsets the GPU pipeline setup reads to bind vertex attributes —
/// spec §3.2's invariant that these offsets "are exposed to the GPU at
/// pipeline setup; changing the record layout requires refreshing those
/// offsets everywhere". Centralizing them here means there is exactly one
/// place to update if [`Shape`]'s layout changes.
pub mod offsets {
    use super::Shape;

    pub const POS: usize = std::mem::offset_of!(Shape, pos);
    pub const ROT: usize = std::mem::offset_of!(Shape, rot);
    pub const SCALE: usize = std::mem::offset_of!(Shape, scale);
    pub const PIVOT: usize = std::mem::offset_of!(Shape, pivot);
    pub const IDS: usize = std::mem::offset_of!(Shape, ids);
    pub const MATIDS: usize = std::mem::offset_of!(Shape, matids);
    /// The high half of `matids` — resolved backend indices — is 8 bytes
    /// (4 × u16) into the `matids` field.
    pub const MATIDS_HIGH: usize = MATIDS + 8;
    pub const TEXSUB: usize = std::mem::offset_of!(Shape, texsub);
    pub const CLR: usize = std::mem::offset_of!(Shape, clr);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_clear() {
        let s = Shape::default();
        assert_eq!(s.kind(), ShapeKind::None);
        assert_eq!(s.mesh_id(), -1);
        assert_eq!(s.texsub, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(s.scale, [1.0, 1.0, 1.0]);
        for slot in 0..4 {
            assert_eq!(s.material_asset_id(slot), NULL_NDX);
        }
    }

    #[test]
    fn pod_size_is_stable() {
        // A change here means the GPU vertex layout (§6.3 fixed locations)
        // must be re-derived; this test exists so that change is never silent.
        assert_eq!(std::mem::size_of::<Shape>(), 124);
    }

    #[test]
    fn local_xform_translates() {
        let mut s = Shape::default();
        s.pos = [1.0, 2.0, 3.0];
        let m = s.local_xform();
        let p = m.transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn shapegroup_kind_roundtrips() {
        let mut s = Shape::default();
        s.set_kind(ShapeKind::ShapeGroup);
        assert_eq!(s.kind(), ShapeKind::ShapeGroup);
    }
}
