//! CPU-side bookkeeping for the path tracer's material/texture resource
//! tables (spec §4.6's "a path tracer over its accelerator's resource
//! table"). Mirrors the rasterizer's pools (`shapes_raster::resource_pools`)
//! but tracks accelerator-side indices rather than bindless GPU slots;
//! kept as a separate, backend-owned copy since the two backends' residency
//! lifetimes are independent (spec §4.9: each backend owns its own caches).

use rustc_hash::FxHashMap;
use shapes_resources::MaterialRecord;

pub const MATERIAL_POOL_CAPACITY: usize = 64;

/// Tracks which texture assets the accelerator has already built a
/// resource for.
#[derive(Default)]
pub struct TexturePool {
    slots: FxHashMap<i32, u16>,
    next: u16,
}

impl TexturePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing accelerator index for `asset_id`, allocating
    /// one if this is the first upload.
    pub fn resident_slot(&mut self, asset_id: i32) -> u16 {
        *self.slots.entry(asset_id).or_insert_with(|| {
            let slot = self.next;
            self.next += 1;
            slot
        })
    }

    /// Read-only lookup, for use from [`shapes_render::AssetResolver`] —
    /// never allocates.
    #[must_use]
    pub fn slot_of(&self, asset_id: i32) -> Option<u16> {
        self.slots.get(&asset_id).copied()
    }
}

/// Material records keyed by asset id, the same resolution surface as the
/// rasterizer's `MaterialPool` (`shapes_raster::resource_pools`).
#[derive(Default)]
pub struct MaterialPool {
    records: FxHashMap<i32, (u16, i32, MaterialRecord)>,
    next_slot: u16,
}

impl MaterialPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or updates) `record` under `asset_id`, resolving to
    /// `shader_id`. Returns an error past capacity.
    pub fn set_for_asset(&mut self, asset_id: i32, shader_id: i32, record: MaterialRecord) -> Result<u16, PoolError> {
        let slot = match self.records.get(&asset_id) {
            Some(&(slot, _, _)) => slot,
            None => {
                if usize::from(self.next_slot) >= MATERIAL_POOL_CAPACITY {
                    return Err(PoolError::CapacityExceeded {
                        capacity: MATERIAL_POOL_CAPACITY,
                        slot: usize::from(self.next_slot),
                    });
                }
                let slot = self.next_slot;
                self.next_slot += 1;
                slot
            }
        };
        self.records.insert(asset_id, (slot, shader_id, record));
        Ok(slot)
    }

    #[must_use]
    pub fn slot_of(&self, asset_id: i32) -> Option<u16> {
        self.records.get(&asset_id).map(|&(slot, _, _)| slot)
    }

    #[must_use]
    pub fn shader_of(&self, asset_id: i32) -> Option<i32> {
        self.records.get(&asset_id).map(|&(_, shader, _)| shader)
    }

    #[must_use]
    pub fn record_for_asset(&self, asset_id: i32) -> Option<&MaterialRecord> {
        self.records.get(&asset_id).map(|(_, _, record)| record)
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
        let a = pool.resident_slot(5);
        let b = pool.resident_slot(5);
        assert_eq!(a, b);
    }

    #[test]
    fn material_pool_reuses_slot_for_same_asset() {
        let mut pool = MaterialPool::new();
        let a = pool.set_for_asset(7, 3, MaterialRecord::default()).unwrap();
        let b = pool.set_for_asset(7, 3, MaterialRecord::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(pool.shader_of(7), Some(3));
    }

    #[test]
    fn unregistered_asset_lookup_is_none() {
        let pool = MaterialPool::new();
        assert_eq!(pool.slot_of(1), None);
        assert_eq!(pool.shader_of(1), None);
    }
}
