//! Render base — spec §4.6: the backend-agnostic resolution helpers that
//! convert asset ids on a [`Shape`] into backend-native handles.
//!
//! Grounded on `original_source/src/render/render_base.h`'s
//! `ResolveTexture`/`ResolveMaterial`. Backend identity (a GPU texture
//! view, a bindless slot) is opaque here — callers supply it through
//! [`AssetResolver`], implemented by whichever backend (§4.7/§4.8) owns the
//! actual upload.

use rustc_hash::FxHashMap;
use shapes_resources::{MaterialRecord, Shape, NULL_NDX};

/// Looks up backend-native handles for resolved assets. A rasterizer
/// implements this over its bindless texture pool / material uniform
/// array; a path tracer over its accelerator's resource table.
pub trait AssetResolver {
    /// Backend-native index for a material asset, or `None` if not yet
    /// resident.
    fn material_backend_index(&self, material_asset_id: i32) -> Option<u16>;
    /// The shader asset id a material resolves to.
    fn shader_for_material(&self, material_asset_id: i32) -> Option<i32>;
    /// Backend-native index for a texture asset, or `None` if not yet
    /// resident.
    fn texture_backend_index(&self, texture_asset_id: i32) -> Option<u16>;
}

#[derive(Clone, Copy, Default)]
struct TextureResolution {
    backend: [Option<u16>; 4],
    ready_count: u8,
}

/// Per-material resolve cache, keyed by material asset id, so a material
/// whose textures are already resident is never re-queried (spec §4.6:
/// "if the backend slot is unset, fetch ... and cache").
#[derive(Default)]
pub struct RenderBase {
    texture_cache: FxHashMap<i32, TextureResolution>,
}

impl RenderBase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `ResolveMaterial(matids[8], &shader)` — for each of the shape's four
    /// material slots, resolves the asset id to a backend index if unset,
    /// and returns the shader id cached from the primary (slot 0) material.
    pub fn resolve_material(&mut self, shape: &mut Shape, resolver: &impl AssetResolver) -> i32 {
        for slot in 0..4 {
            let asset_id = i32::from(shape.material_asset_id(slot));
            if shape.material_asset_id(slot) == NULL_NDX {
                continue;
            }
            if shape.material_backend_index(slot) == NULL_NDX {
                if let Some(idx) = resolver.material_backend_index(asset_id) {
                    shape.set_material_backend_index(slot, idx);
                }
            }
        }
        let primary = i32::from(shape.material_asset_id(0));
        let shader_id = resolver.shader_for_material(primary).unwrap_or(-1);
        shape.set_shader_id(shader_id);
        shader_id
    }

    /// `ResolveTexture(texids[8])` — resolves a material's four texture
    /// slots, caching per-slot backend indices and a ready-count. A
    /// material is "ready" once `ready_count == 4` (every slot resolved or
    /// confirmed null).
    pub fn resolve_texture(
        &mut self,
        material_asset_id: i32,
        material: &MaterialRecord,
        resolver: &impl AssetResolver,
    ) -> u8 {
        let entry = self.texture_cache.entry(material_asset_id).or_default();
        if entry.ready_count == 4 {
            return entry.ready_count;
        }
        entry.ready_count = 0;
        for slot in 0..4 {
            let tex_asset = material.textures[slot];
            if tex_asset < 0 {
                entry.ready_count += 1;
                continue;
            }
            if entry.backend[slot].is_none() {
                entry.backend[slot] = resolver.texture_backend_index(tex_asset);
            }
            if entry.backend[slot].is_some() {
                entry.ready_count += 1;
            }
        }
        entry.ready_count
    }

    #[must_use]
    pub fn texture_backend_index(&self, material_asset_id: i32, slot: usize) -> Option<u16> {
        self.texture_cache.get(&material_asset_id)?.backend[slot]
    }

    /// Invalidates every cached resolution — called after an asset delete
    /// (spec §5: "deleting an asset invalidates cached handles; clients
    /// must re-resolve").
    pub fn invalidate_all(&mut self) {
        self.texture_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_resources::ShapeKind;

    struct Stub;
    impl AssetResolver for Stub {
        fn material_backend_index(&self, material_asset_id: i32) -> Option<u16> {
            Some(material_asset_id as u16 + 100)
        }
        fn shader_for_material(&self, _material_asset_id: i32) -> Option<i32> {
            Some(7)
        }
        fn texture_backend_index(&self, texture_asset_id: i32) -> Option<u16> {
            Some(texture_asset_id as u16 + 1000)
        }
    }

    #[test]
    fn resolve_material_caches_backend_index_and_shader() {
        let mut base = RenderBase::new();
        let mut shape = Shape::default();
        shape.set_kind(ShapeKind::Mesh);
        shape.set_material_asset_id(0, 5);
        let shader = base.resolve_material(&mut shape, &Stub);
        assert_eq!(shader, 7);
        assert_eq!(shape.material_backend_index(0), 105);
        assert_eq!(shape.shader_id(), 7);
    }

    #[test]
    fn resolve_texture_reaches_ready_when_all_slots_settled() {
        let mut base = RenderBase::new();
        let mut material = MaterialRecord::default();
        material.textures = [3, -1, -1, -1];
        let ready = base.resolve_texture(42, &material, &Stub);
        assert_eq!(ready, 4);
        assert_eq!(base.texture_backend_index(42, 0), Some(1003));
    }

    #[test]
    fn resolve_texture_is_cached_after_ready() {
        let mut base = RenderBase::new();
        let material = MaterialRecord::default();
        base.resolve_texture(1, &material, &Stub);
        base.invalidate_all();
        assert_eq!(base.texture_backend_index(1, 0), None);
    }
}
