//! Shape group BST pool — spec §3.4/§4.5.
//!
//! Grounded on `original_source/src/render/render_base.h`'s `ShapeGroup`
//! struct and `KEY_NULL`/`NODE_NULL` sentinels. Groups live in one flat
//! pool in creation order — `PrefixScanShapes` (spec §4.5 Phase 2) walks
//! that creation order directly, not a BST traversal, so the tree here
//! exists purely to make "does a group for this key already exist"
//! amortized O(1) under the coherent-input assumption.

use glam::Vec4;

pub const KEY_NULL: u64 = 0x2_540B_E400;
pub const NODE_NULL: i32 = -1;

#[derive(Clone, Debug)]
pub struct ShapeGroup {
    pub name: String,
    pub key: u64,
    pub left: i32,
    pub right: i32,
    pub meshids: Vec4,
    pub shader: i32,
    pub count: u32,
    pub offset: u32,
}

impl ShapeGroup {
    fn new(key: u64, meshids: Vec4, shader: i32, name: String) -> Self {
        ShapeGroup { name, key, left: NODE_NULL, right: NODE_NULL, meshids, shader, count: 0, offset: 0 }
    }
}

/// Composes the 64-bit render-state key from three asset ids (spec §4.5
/// "Keys"): `material | shader << 16 | mesh << 24`.
#[must_use]
pub fn shape_key(material_id: u32, shader_id: u32, mesh_id: u32) -> u64 {
    u64::from(material_id) | (u64::from(shader_id) << 16) | (u64::from(mesh_id) << 24)
}

/// The per-frame pool of [`ShapeGroup`]s, rebuilt every frame and reused
/// via power-of-two growth (spec §5 "Shared-resource policy").
pub struct ShapeGroupPool {
    groups: Vec<ShapeGroup>,
    capacity: usize,
    root: i32,
    last_hit: i32,
}

impl Default for ShapeGroupPool {
    fn default() -> Self {
        ShapeGroupPool { groups: Vec::new(), capacity: 0, root: NODE_NULL, last_hit: NODE_NULL }
    }
}

impl ShapeGroupPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all groups for a new frame without releasing the backing
    /// allocation — "reused across frames via power-of-two growth".
    pub fn reset(&mut self) {
        self.groups.clear();
        self.root = NODE_NULL;
        self.last_hit = NODE_NULL;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, node: i32) -> Option<&ShapeGroup> {
        usize::try_from(node).ok().and_then(|i| self.groups.get(i))
    }

    /// Explicit doubling growth, tracked independently of `Vec`'s own
    /// reservation strategy so "capacity doubles exactly once" is a
    /// property of this type, not an implementation detail of `Vec`.
    fn ensure_capacity(&mut self) {
        if self.groups.len() == self.capacity {
            let new_capacity = if self.capacity == 0 { 1 } else { self.capacity * 2 };
            self.groups.reserve_exact(new_capacity - self.groups.len());
            self.capacity = new_capacity;
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn push(&mut self, group: ShapeGroup) -> i32 {
        self.ensure_capacity();
        let idx = self.groups.len() as i32;
        self.groups.push(group);
        idx
    }

    /// `InsertNode`/`FindNode` fused: returns the node index for `key`,
    /// creating it if absent. Tries the cached `last_hit` node first
    /// (exploiting run-coherence — most consecutive shapes share a key)
    /// before falling back to a root-anchored BST descent.
    pub fn find_or_insert(&mut self, key: u64, meshids: Vec4, shader: i32, name: impl Into<String>) -> i32 {
        if self.last_hit != NODE_NULL {
            if let Some(g) = self.get(self.last_hit) {
                if g.key == key {
                    return self.last_hit;
                }
            }
        }

        if self.root == NODE_NULL {
            let idx = self.push(ShapeGroup::new(key, meshids, shader, name.into()));
            self.root = idx;
            self.last_hit = idx;
            return idx;
        }

        let mut cur = self.root;
        loop {
            let g = self.get(cur).expect("valid BST node");
            match key.cmp(&g.key) {
                std::cmp::Ordering::Equal => {
                    self.last_hit = cur;
                    return cur;
                }
                std::cmp::Ordering::Less => {
                    if g.left == NODE_NULL {
                        let idx = self.push(ShapeGroup::new(key, meshids, shader, name.into()));
                        self.groups[cur as usize].left = idx;
                        self.last_hit = idx;
                        return idx;
                    }
                    cur = g.left;
                }
                std::cmp::Ordering::Greater => {
                    if g.right == NODE_NULL {
                        let idx = self.push(ShapeGroup::new(key, meshids, shader, name.into()));
                        self.groups[cur as usize].right = idx;
                        self.last_hit = idx;
                        return idx;
                    }
                    cur = g.right;
                }
            }
        }
    }

    pub fn increment(&mut self, node: i32) -> u32 {
        let g = &mut self.groups[node as usize];
        let n = g.count;
        g.count += 1;
        n
    }

    /// `PrefixScanShapes` (spec §4.5 Phase 2) — walks creation order,
    /// writing `group.offset = Σ previous group.count`. Returns the total
    /// instance count across all groups.
    pub fn prefix_scan(&mut self) -> u32 {
        let mut running = 0;
        for g in &mut self.groups {
            g.offset = running;
            running += g.count;
        }
        running
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeGroup> {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_composition_matches_spec_example() {
        assert_eq!(shape_key(5, 2, 17), 285_343_749);
    }

    #[test]
    fn repeated_key_reuses_node_and_increments() {
        let mut pool = ShapeGroupPool::new();
        let n1 = pool.find_or_insert(shape_key(1, 0, 0), Vec4::ZERO, 0, "a");
        pool.increment(n1);
        let n2 = pool.find_or_insert(shape_key(1, 0, 0), Vec4::ZERO, 0, "a");
        pool.increment(n2);
        assert_eq!(n1, n2);
        assert_eq!(pool.get(n1).unwrap().count, 2);
    }

    #[test]
    fn distinct_keys_produce_distinct_groups() {
        let mut pool = ShapeGroupPool::new();
        let n1 = pool.find_or_insert(shape_key(1, 0, 0), Vec4::ZERO, 0, "a");
        let n2 = pool.find_or_insert(shape_key(2, 0, 0), Vec4::ZERO, 0, "b");
        assert_ne!(n1, n2);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn prefix_scan_accumulates_offsets_in_creation_order() {
        let mut pool = ShapeGroupPool::new();
        let a = pool.find_or_insert(shape_key(1, 0, 0), Vec4::ZERO, 0, "a");
        let b = pool.find_or_insert(shape_key(2, 0, 0), Vec4::ZERO, 0, "b");
        for _ in 0..3 {
            pool.increment(a);
        }
        for _ in 0..2 {
            pool.increment(b);
        }
        let total = pool.prefix_scan();
        assert_eq!(total, 5);
        assert_eq!(pool.get(a).unwrap().offset, 0);
        assert_eq!(pool.get(b).unwrap().offset, 3);
    }

    #[test]
    fn pool_doubles_capacity_exactly_once_past_power_of_two() {
        let mut pool = ShapeGroupPool::new();
        for i in 0..4 {
            pool.find_or_insert(shape_key(i, 0, 0), Vec4::ZERO, 0, "g");
        }
        assert_eq!(pool.capacity(), 4);
        pool.find_or_insert(shape_key(99, 0, 0), Vec4::ZERO, 0, "g5");
        assert_eq!(pool.capacity(), 8);
    }
}
