//! Texture render record — spec §3.5.

/// Backend filter mode for a resolved texture.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FilterMode {
    #[default]
    Linear,
    Nearest,
    Anisotropic,
}

/// Where a resolved texture is bound (plain 2D sampler, bindless array
/// slot, or cube/array target for environment maps and shadow atlases).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BindTarget {
    #[default]
    Texture2D,
    Bindless,
    TextureArray,
    Cube,
}

/// CPU-side record describing one resolved texture. Only the asset id is
/// ever stored on a [`crate::shape::Shape`]; this record is what
/// `ResolveTexture` (spec §4.6) produces and caches.
#[derive(Clone, Debug, Default)]
pub struct TextureRecord {
    pub asset_id: i32,
    /// Backend-native handle/index, once resolved. `None` until resolution.
    pub backend_id: Option<u32>,
    pub filter: FilterMode,
    pub bind_target: BindTarget,
}

impl TextureRecord {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.backend_id.is_some()
    }
}
