//! CPU-side bookkeeping for the rasterizer's three GPU-side uniform pools
//! (spec §4.7 "Resource caches"): textures, materials, lights.
//!
//! Each pool is a pure logical structure — it tracks slot occupancy and
//! dirtiness but does not itself own a `wgpu::Buffer`; the backend flushes
//! a dirty pool into its mapped range in one write. Grounded on the
//! teacher's `ModelBufferAllocator` (`renderer/core/resources/allocator.rs`),
//! which keeps the same split between "pure logical structure" and the GPU
//! resource it eventually backs.

use rustc_hash::FxHashMap;
use shapes_resources::{LightRecord, MaterialRecord};

pub const TEXTURE_POOL_CAPACITY: usize = 384;
pub const MATERIAL_POOL_CAPACITY: usize = 64;
pub const LIGHT_POOL_CAPACITY: usize = 64;

/// A sparse array of bindless texture handles. Slots are made resident on
/// first upload and stay resident until explicitly freed.
#[derive(Default)]
pub struct TexturePool {
    slots: FxHashMap<i32, u16>,
    free_list: Vec<u16>,
    next: u16,
}

impl TexturePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing bindless slot for `asset_id`, allocating one
    /// if this is the first upload (spec: "made resident on first
    /// upload").
    pub fn resident_slot(&mut self, asset_id: i32) -> Option<u16> {
        if let Some(&slot) = self.slots.get(&asset_id) {
            return Some(slot);
        }
        let slot = self.free_list.pop().unwrap_or(self.next);
        if slot == self.next {
            self.next += 1;
        }
        if usize::from(slot) >= TEXTURE_POOL_CAPACITY {
            return None;
        }
        self.slots.insert(asset_id, slot);
        Some(slot)
    }

    pub fn release(&mut self, asset_id: i32) {
        if let Some(slot) = self.slots.remove(&asset_id) {
            self.free_list.push(slot);
        }
    }

    /// Read-only lookup of an already-resident slot, for use from
    /// [`shapes_render::AssetResolver`] — unlike `resident_slot`, never
    /// allocates.
    #[must_use]
    pub fn slot_of(&self, asset_id: i32) -> Option<u16> {
        self.slots.get(&asset_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Up to 64 material records, rewritten as a batch whenever any entry is
/// dirty (spec: "rewritten in a single mapped range whenever any material
/// is dirty"). Also the backend's `AssetResolver` for materials: each
/// record is keyed by the material's asset id so a [`shapes_render::RenderBase`]
/// can resolve a shape's material handle to this pool's slot and to the
/// shader the material resolves to.
pub struct MaterialPool {
    records: Vec<MaterialRecord>,
    dirty: bool,
    asset_slot: FxHashMap<i32, u16>,
    shader_of: FxHashMap<i32, i32>,
}

impl Default for MaterialPool {
    fn default() -> Self {
        MaterialPool {
            records: Vec::with_capacity(MATERIAL_POOL_CAPACITY),
            dirty: false,
            asset_slot: FxHashMap::default(),
            shader_of: FxHashMap::default(),
        }
    }
}

impl MaterialPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `record` into `slot`, growing the backing vec as needed, and
    /// marks the whole pool dirty. Returns an error if `slot` exceeds the
    /// fixed capacity.
    pub fn set(&mut self, slot: usize, record: MaterialRecord) -> Result<(), PoolError> {
        if slot >= MATERIAL_POOL_CAPACITY {
            return Err(PoolError::CapacityExceeded { capacity: MATERIAL_POOL_CAPACITY, slot });
        }
        if slot >= self.records.len() {
            self.records.resize(slot + 1, MaterialRecord::default());
        }
        self.records[slot] = record;
        self.dirty = true;
        Ok(())
    }

    /// Registers `record` under `asset_id`, resolving to `shader_id`.
    /// Reuses the asset's existing slot if it's already resident.
    pub fn set_for_asset(&mut self, asset_id: i32, shader_id: i32, record: MaterialRecord) -> Result<u16, PoolError> {
        let slot = match self.asset_slot.get(&asset_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.records.len();
                if slot >= MATERIAL_POOL_CAPACITY {
                    return Err(PoolError::CapacityExceeded { capacity: MATERIAL_POOL_CAPACITY, slot });
                }
                let slot = slot as u16;
                self.asset_slot.insert(asset_id, slot);
                slot
            }
        };
        self.shader_of.insert(asset_id, shader_id);
        self.set(usize::from(slot), record)?;
        Ok(slot)
    }

    /// The pool slot a material asset resolves to, or `None` if not yet
    /// resident — the backend index [`shapes_render::AssetResolver`] reads.
    #[must_use]
    pub fn slot_of(&self, asset_id: i32) -> Option<u16> {
        self.asset_slot.get(&asset_id).copied()
    }

    /// The shader asset id a material resolves to, cached from the last
    /// `set_for_asset` call.
    #[must_use]
    pub fn shader_of(&self, asset_id: i32) -> Option<i32> {
        self.shader_of.get(&asset_id).copied()
    }

    #[must_use]
    pub fn record_for_asset(&self, asset_id: i32) -> Option<&MaterialRecord> {
        let slot = self.slot_of(asset_id)?;
        self.records.get(usize::from(slot))
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the records to upload, if dirty, and clears the flag —
    /// called exactly once per frame by the backend before any draw reads
    /// the pool (spec §5: "a frame's material pool upload precedes any
    /// draw that reads it").
    pub fn take_upload(&mut self) -> Option<&[MaterialRecord]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(&self.records)
    }
}

/// Up to 64 light records, same dirty-batch-upload discipline as
/// [`MaterialPool`].
pub struct LightPool {
    records: Vec<LightRecord>,
    dirty: bool,
}

impl Default for LightPool {
    fn default() -> Self {
        LightPool { records: Vec::with_capacity(LIGHT_POOL_CAPACITY), dirty: false }
    }
}

impl LightPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: usize, record: LightRecord) -> Result<(), PoolError> {
        if slot >= LIGHT_POOL_CAPACITY {
            return Err(PoolError::CapacityExceeded { capacity: LIGHT_POOL_CAPACITY, slot });
        }
        if slot >= self.records.len() {
            self.records.resize(slot + 1, LightRecord::default());
        }
        self.records[slot] = record;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn take_upload(&mut self) -> Option<&[LightRecord]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(&self.records)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("slot {slot} exceeds pool capacity {capacity}")]
    CapacityExceeded { capacity: usize, slot: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_pool_reuses_slot_for_same_asset() {
        let mut pool = TexturePool::new();
        let a = pool.resident_slot(5).unwrap();
        let b = pool.resident_slot(5).unwrap();
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn texture_pool_recycles_released_slots() {
        let mut pool = TexturePool::new();
        let a = pool.resident_slot(1).unwrap();
        pool.release(1);
        let b = pool.resident_slot(2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn texture_pool_refuses_past_capacity() {
        let mut pool = TexturePool::new();
        for id in 0..TEXTURE_POOL_CAPACITY as i32 {
            assert!(pool.resident_slot(id).is_some());
        }
        assert!(pool.resident_slot(TEXTURE_POOL_CAPACITY as i32).is_none());
    }

    #[test]
    fn material_pool_upload_clears_dirty_flag() {
        let mut pool = MaterialPool::new();
        pool.set(0, MaterialRecord::default()).unwrap();
        assert!(pool.is_dirty());
        assert!(pool.take_upload().is_some());
        assert!(!pool.is_dirty());
        assert!(pool.take_upload().is_none());
    }

    #[test]
    fn material_pool_rejects_slot_past_capacity() {
        let mut pool = MaterialPool::new();
        let err = pool.set(MATERIAL_POOL_CAPACITY, MaterialRecord::default());
        assert!(err.is_err());
    }

    #[test]
    fn material_pool_reuses_slot_for_same_asset() {
        let mut pool = MaterialPool::new();
        let a = pool.set_for_asset(7, 3, MaterialRecord::default()).unwrap();
        let b = pool.set_for_asset(7, 3, MaterialRecord::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(pool.shader_of(7), Some(3));
        assert!(pool.record_for_asset(7).is_some());
    }

    #[test]
    fn material_pool_asset_lookup_misses_are_none() {
        let pool = MaterialPool::new();
        assert_eq!(pool.slot_of(99), None);
        assert_eq!(pool.shader_of(99), None);
    }
}
