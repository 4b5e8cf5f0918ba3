//! Tracks which meshes the accelerator has actually uploaded.
//!
//! Open question (spec §4.8, resolved here): `UpdateMesh` only runs when a
//! mesh's group carries a bound material (the accelerator's bindless
//! interfaces need both the geometry *and* its material to build an
//! instance). A mesh whose material never resolves stays in `pending`
//! indefinitely — there is no separate timeout or forced-resolve path in
//! the reference; it becomes resident only on the first sync where its
//! group's material is bound. See `DESIGN.md`.

use rustc_hash::FxHashSet;

#[derive(Default)]
pub struct MeshResidency {
    resident: FxHashSet<i32>,
    pending: FxHashSet<i32>,
}

impl MeshResidency {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per synced group this frame. If `material_bound` is
    /// false the mesh is recorded as pending and left non-resident —
    /// deliberately not retried automatically.
    pub fn update_mesh(&mut self, mesh_asset_id: i32, material_bound: bool) {
        if material_bound {
            self.resident.insert(mesh_asset_id);
            self.pending.remove(&mesh_asset_id);
        } else if !self.resident.contains(&mesh_asset_id) {
            self.pending.insert(mesh_asset_id);
        }
    }

    #[must_use]
    pub fn is_resident(&self, mesh_asset_id: i32) -> bool {
        self.resident.contains(&mesh_asset_id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Forces every resident mesh back to pending — `mark_all_dirty`'s
    /// effect on the accelerator's geometry cache.
    pub fn invalidate_all(&mut self) {
        for id in self.resident.drain() {
            self.pending.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_without_material_stays_pending_forever() {
        let mut residency = MeshResidency::new();
        residency.update_mesh(1, false);
        residency.update_mesh(1, false);
        residency.update_mesh(1, false);
        assert!(!residency.is_resident(1));
        assert_eq!(residency.pending_count(), 1);
    }

    #[test]
    fn mesh_becomes_resident_once_material_binds() {
        let mut residency = MeshResidency::new();
        residency.update_mesh(1, false);
        residency.update_mesh(1, true);
        assert!(residency.is_resident(1));
        assert_eq!(residency.pending_count(), 0);
    }

    #[test]
    fn invalidate_all_moves_resident_back_to_pending() {
        let mut residency = MeshResidency::new();
        residency.update_mesh(1, true);
        residency.invalidate_all();
        assert!(!residency.is_resident(1));
        assert_eq!(residency.pending_count(), 1);
    }
}
