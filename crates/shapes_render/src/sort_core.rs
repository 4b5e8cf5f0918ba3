//! State-sort core — spec §4.5, the four-phase insert / prefix-scan /
//! bucket-sort / transmit pipeline.
//!
//! Grounded on `original_source/src/render/render_base.cpp`'s
//! `InsertShapes`/`PrefixScanShapes`/`SortShapes`/`InsertAndSortShapes`.

use crate::shape_group::{shape_key, ShapeGroupPool};
use glam::{Mat4, Vec4};
use shapes_resources::{Shape, ShapeBuffer, ShapeKind};

/// Looks up a shape container by its asset id — implemented by whatever
/// owns the set of live `ShapeBuffer`s (spec §4.1's registry, specialized
/// to this payload type) so `InsertShapes`/`SortShapes` can recurse into a
/// `SHAPEGRP` shape's referenced container (spec §4.5 Phase 1 step 1).
pub trait ShapeSource {
    fn container(&self, asset_id: i32) -> Option<&ShapeBuffer>;
}

/// The sort core's reused, frame-to-frame buffers (spec §5: "owned
/// exclusively by `RenderBase` and reused across frames via power-of-two
/// growth").
#[derive(Default)]
pub struct SortCore {
    pub pool: ShapeGroupPool,
    bins: Vec<i32>,
    offsets: Vec<u32>,
    sorted_shapes: Vec<Shape>,
    sorted_xforms: Vec<Mat4>,
    checksum: u64,
    checksum_prev: u64,
}

impl SortCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sorted_shapes(&self) -> &[Shape] {
        &self.sorted_shapes
    }

    #[must_use]
    pub fn sorted_xforms(&self) -> &[Mat4] {
        &self.sorted_xforms
    }

    /// `InsertAndSortShapes` — runs all four phases against `root` (the
    /// container holding the top-level emitted shapes) under the scene
    /// object's world transform. Returns `true` if the instance buffer
    /// content changed since the previous call (i.e. transmission is
    /// required — Phase 4).
    pub fn insert_and_sort_shapes(
        &mut self,
        root: &ShapeBuffer,
        object_xform: Mat4,
        source: &impl ShapeSource,
    ) -> bool {
        self.pool.reset();
        self.bins.clear();
        self.offsets.clear();

        insert_walk(root, source, &mut self.pool, &mut self.bins, &mut self.offsets);
        let total = self.pool.prefix_scan() as usize;

        self.sorted_shapes.clear();
        self.sorted_shapes.resize(total, Shape::default());
        self.sorted_xforms.clear();
        self.sorted_xforms.resize(total, Mat4::IDENTITY);

        let mut cursor = 0usize;
        sort_walk(
            root,
            source,
            &self.pool,
            &self.bins,
            &self.offsets,
            object_xform,
            &mut cursor,
            &mut self.sorted_shapes,
            &mut self.sorted_xforms,
        );

        self.checksum_prev = self.checksum;
        self.checksum = checksum(&self.sorted_shapes, &self.sorted_xforms);
        self.checksum != self.checksum_prev
    }
}

fn insert_walk(
    container: &ShapeBuffer,
    source: &impl ShapeSource,
    pool: &mut ShapeGroupPool,
    bins: &mut Vec<i32>,
    offsets: &mut Vec<u32>,
) {
    for shape in container.as_slice() {
        if shape.is_invisible() {
            continue;
        }
        if shape.kind() == ShapeKind::ShapeGroup {
            if let Some(child) = source.container(shape.mesh_id()) {
                insert_walk(child, source, pool, bins, offsets);
            }
            continue;
        }
        let key = shape_key(
            u32::from(shape.material_asset_id(0)),
            shape.shader_id().max(0) as u32,
            shape.mesh_id().max(0) as u32,
        );
        let node = pool.find_or_insert(key, Vec4::from(shape.meshids), shape.shader_id(), "grp");
        let ndx = pool.increment(node);
        bins.push(node);
        offsets.push(ndx);
    }
}

#[allow(clippy::too_many_arguments)]
fn sort_walk(
    container: &ShapeBuffer,
    source: &impl ShapeSource,
    pool: &ShapeGroupPool,
    bins: &[i32],
    offsets: &[u32],
    object_xform: Mat4,
    cursor: &mut usize,
    out_shapes: &mut [Shape],
    out_xforms: &mut [Mat4],
) {
    for shape in container.as_slice() {
        if shape.is_invisible() {
            continue;
        }
        if shape.kind() == ShapeKind::ShapeGroup {
            if let Some(child) = source.container(shape.mesh_id()) {
                let child_xform = object_xform * shape.local_xform();
                sort_walk(child, source, pool, bins, offsets, child_xform, cursor, out_shapes, out_xforms);
            }
            continue;
        }
        let node = bins[*cursor];
        let ndx = offsets[*cursor];
        *cursor += 1;
        let group = pool.get(node).expect("bin references a live group");
        let dest = (group.offset + ndx) as usize;
        out_shapes[dest] = *shape;
        out_xforms[dest] = object_xform * shape.local_xform();
    }
}

/// `Σ (mesh_id ⊕ quantizedPosition ⊕ quantizedScale)` over the sorted
/// result (spec §4.5 Phase 4) — detects whether Phase 3's output changed
/// frame-to-frame so transmission can be skipped when it didn't.
fn checksum(shapes: &[Shape], xforms: &[Mat4]) -> u64 {
    let quantize = |v: f32| (v * 1000.0).round() as i64 as u64;
    shapes
        .iter()
        .zip(xforms)
        .fold(0u64, |acc, (shape, xform)| {
            let (scale, _rotation, translation) = xform.to_scale_rotation_translation();
            let q = shape.mesh_id() as u64
                ^ quantize(translation.x)
                ^ quantize(translation.y)
                ^ quantize(translation.z)
                ^ quantize(scale.x)
                ^ quantize(scale.y)
                ^ quantize(scale.z);
            acc.wrapping_add(q)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_resources::{pack_rgba, ShapeKind as SK};

    struct NoGroups;
    impl ShapeSource for NoGroups {
        fn container(&self, _asset_id: i32) -> Option<&ShapeBuffer> {
            None
        }
    }

    fn leaf_shape(mesh: i32, material: u16, shader: i32) -> Shape {
        let mut s = Shape::default();
        s.set_kind(SK::Mesh);
        s.set_mesh_id(mesh);
        s.set_shader_id(shader);
        s.set_material_asset_id(0, material);
        s.clr = pack_rgba(1.0, 1.0, 1.0, 1.0);
        s
    }

    #[test]
    fn two_group_sort_matches_spec_scenario() {
        let mut root = ShapeBuffer::new();
        for i in 0..100 {
            let (_, s) = root.add();
            *s = if i % 2 == 0 { leaf_shape(10, 1, 0) } else { leaf_shape(20, 2, 0) };
        }
        let mut core = SortCore::new();
        let changed = core.insert_and_sort_shapes(&root, Mat4::IDENTITY, &NoGroups);
        assert!(changed);
        assert_eq!(core.pool.len(), 2);
        assert_eq!(core.sorted_shapes().len(), 100);

        let groups: Vec<_> = core.pool.iter().collect();
        assert_eq!(groups[0].count, 50);
        assert_eq!(groups[1].count, 50);
        assert_eq!(groups[0].offset, 0);
        assert_eq!(groups[1].offset, 50);
        for shape in &core.sorted_shapes()[0..50] {
            assert_eq!(shape.mesh_id(), 10);
        }
        for shape in &core.sorted_shapes()[50..100] {
            assert_eq!(shape.mesh_id(), 20);
        }
    }

    #[test]
    fn unchanged_scene_skips_transmission_on_second_pass() {
        let mut root = ShapeBuffer::new();
        let (_, s) = root.add();
        *s = leaf_shape(1, 1, 0);
        let mut core = SortCore::new();
        assert!(core.insert_and_sort_shapes(&root, Mat4::IDENTITY, &NoGroups));
        assert!(!core.insert_and_sort_shapes(&root, Mat4::IDENTITY, &NoGroups));
    }

    #[test]
    fn one_shape_makes_one_group() {
        let mut root = ShapeBuffer::new();
        let (_, s) = root.add();
        *s = leaf_shape(1, 1, 0);
        let mut core = SortCore::new();
        core.insert_and_sort_shapes(&root, Mat4::IDENTITY, &NoGroups);
        assert_eq!(core.pool.len(), 1);
        let g = core.pool.iter().next().unwrap();
        assert_eq!(g.count, 1);
        assert_eq!(g.offset, 0);
    }

    #[test]
    fn zero_shapes_emits_nothing() {
        let root = ShapeBuffer::new();
        let mut core = SortCore::new();
        core.insert_and_sort_shapes(&root, Mat4::IDENTITY, &NoGroups);
        assert_eq!(core.pool.len(), 0);
        assert!(core.sorted_shapes().is_empty());
    }

    #[test]
    fn nested_shape_groups_flatten() {
        struct Nested(ShapeBuffer);
        impl ShapeSource for Nested {
            fn container(&self, asset_id: i32) -> Option<&ShapeBuffer> {
                if asset_id == 99 {
                    Some(&self.0)
                } else {
                    None
                }
            }
        }
        let mut leaf = ShapeBuffer::new();
        let (_, s) = leaf.add();
        *s = leaf_shape(7, 1, 0);
        let source = Nested(leaf);

        let mut root = ShapeBuffer::new();
        let (_, g) = root.add();
        g.set_kind(SK::ShapeGroup);
        g.set_mesh_id(99);

        let mut core = SortCore::new();
        core.insert_and_sort_shapes(&root, Mat4::IDENTITY, &source);
        assert_eq!(core.sorted_shapes().len(), 1);
        assert_eq!(core.sorted_shapes()[0].mesh_id(), 7);
    }
}
