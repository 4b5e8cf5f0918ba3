//! Generic asset registry — spec §4.1.
//!
//! `Registry<T>` is a stable name→id mapping over an arbitrary payload
//! type `T`; `shapes_scene` instantiates it with its own `ObjectKind`
//! payload so the registry can be the single source of ids for *every*
//! object in the graph (assets and behavior nodes alike), matching the
//! reference's single global `ObjectList`, without this crate needing to
//! know what a scene object is.
//!
//! Grounded on `original_source/src/core/object_list.cpp`'s `AddObject` /
//! `DeleteObject` (dense ids, "DO NOT ERASE HERE" — deletion nulls the slot
//! but never compacts) and the teacher's `rustc_hash::FxHashMap` name-index
//! idiom.

use rustc_hash::FxHashMap;
use shapes_core::ObjectId;

struct Slot<T> {
    name: String,
    payload: T,
}

/// A registry of `T` keyed by dense [`ObjectId`]s. Ids are never reused or
/// compacted after deletion — a stale id simply resolves to `None` forever.
pub struct Registry<T> {
    slots: Vec<Option<Slot<T>>>,
    by_name: FxHashMap<String, ObjectId>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry { slots: Vec::new(), by_name: FxHashMap::default() }
    }
}

impl<T> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new object, returning its dense id. Fails loudly (panics)
    /// if `name` is already registered — the reference treats duplicate
    /// names as a construction bug, not a recoverable error, since names
    /// are meant to be unique per registry (spec §4.1 contract).
    pub fn add(&mut self, name: impl Into<String>, payload: T) -> ObjectId {
        let name = name.into();
        assert!(
            !self.by_name.contains_key(&name),
            "asset registry: duplicate name '{name}'"
        );
        let id = ObjectId::new(self.slots.len() as i32);
        self.by_name.insert(name.clone(), id);
        self.slots.push(Some(Slot { name, payload }));
        id
    }

    /// Fails silently — `None` — on a lookup miss, matching spec §7's
    /// "Asset-not-found" handling.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        let idx = id.index()?;
        self.slots.get(idx)?.as_ref().map(|s| &s.payload)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        let idx = id.index()?;
        self.slots.get_mut(idx)?.as_mut().map(|s| &mut s.payload)
    }

    #[must_use]
    pub fn name_of(&self, id: ObjectId) -> Option<&str> {
        let idx = id.index()?;
        self.slots.get(idx)?.as_ref().map(|s| s.name.as_str())
    }

    /// Nulls the slot; does not compact `self.slots` and does not reuse the
    /// id (`original_source/src/core/object_list.cpp`: "DO NOT ERASE HERE").
    pub fn delete(&mut self, id: ObjectId) {
        if let Some(idx) = id.index() {
            if let Some(slot) = self.slots.get_mut(idx).and_then(Option::take) {
                self.by_name.remove(&slot.name);
            }
        }
    }

    pub fn rename(&mut self, id: ObjectId, new_name: impl Into<String>) {
        let new_name = new_name.into();
        if let Some(idx) = id.index() {
            if let Some(Some(slot)) = self.slots.get_mut(idx) {
                self.by_name.remove(&slot.name);
                self.by_name.insert(new_name.clone(), id);
                slot.name = new_name;
            }
        }
    }

    /// Iterates live `(id, &T)` pairs in id order, skipping deleted slots.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref().map(|s| (ObjectId::new(i as i32), &s.payload))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_nulls_without_compacting() {
        let mut reg: Registry<i32> = Registry::new();
        let a = reg.add("a", 1);
        let b = reg.add("b", 2);
        reg.delete(a);
        assert!(reg.get(a).is_none());
        assert_eq!(reg.get(b), Some(&2));
        // ids are never reused: adding a third object does not reclaim `a`'s slot index.
        let c = reg.add("c", 3);
        assert_ne!(c, a);
        assert_eq!(c.raw(), 2);
    }

    #[test]
    fn find_is_silent_on_miss() {
        let reg: Registry<i32> = Registry::new();
        assert_eq!(reg.find("nope"), None);
    }

    #[test]
    #[should_panic(expected = "duplicate name")]
    fn duplicate_name_panics() {
        let mut reg: Registry<i32> = Registry::new();
        reg.add("dup", 1);
        reg.add("dup", 2);
    }
}
