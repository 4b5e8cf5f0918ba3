//! Phase 4 for the path-trace backend — spec §4.8: "each group becomes an
//! *instance group* of (mesh, material) in the accelerator library, with
//! one transform per instance," in place of the rasterizer's flat
//! instance buffer.

use glam::Mat4;
use shapes_render::ShapeGroup;
use shapes_resources::Shape;

#[derive(Clone, Debug, PartialEq)]
pub struct InstanceGroup {
    pub mesh_asset_id: i32,
    pub material_asset_id: u16,
    pub transforms: Vec<Mat4>,
}

/// Builds one [`InstanceGroup`] per sorted [`ShapeGroup`], reading that
/// group's slice of `shapes`/`xforms` directly by offset/count — the same
/// slice the rasterizer instead binds as a vertex stream.
#[must_use]
pub fn build_instance_groups(groups: &[ShapeGroup], shapes: &[Shape], xforms: &[Mat4]) -> Vec<InstanceGroup> {
    groups
        .iter()
        .filter(|g| g.count > 0)
        .map(|g| {
            let start = g.offset as usize;
            let end = start + g.count as usize;
            let material_asset_id = shapes.get(start).map_or(0, |s| s.material_asset_id(0));
            InstanceGroup {
                mesh_asset_id: g.meshids.x as i32,
                material_asset_id,
                transforms: xforms[start..end].to_vec(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_render::shape_key;

    fn group(key: u64, mesh: f32, count: u32, offset: u32) -> ShapeGroup {
        ShapeGroup {
            name: "g".into(),
            key,
            left: -1,
            right: -1,
            meshids: glam::Vec4::new(mesh, 0.0, 0.0, 0.0),
            shader: 0,
            count,
            offset,
        }
    }

    #[test]
    fn each_group_becomes_one_instance_group_with_its_transform_slice() {
        let groups = vec![group(shape_key(1, 0, 7), 7.0, 2, 0), group(shape_key(2, 0, 9), 9.0, 1, 2)];
        let mut shapes = vec![Shape::default(); 3];
        for s in &mut shapes {
            s.set_material_asset_id(0, 5);
        }
        let xforms = vec![Mat4::IDENTITY, Mat4::from_translation(glam::Vec3::X), Mat4::IDENTITY];

        let instance_groups = build_instance_groups(&groups, &shapes, &xforms);
        assert_eq!(instance_groups.len(), 2);
        assert_eq!(instance_groups[0].mesh_asset_id, 7);
        assert_eq!(instance_groups[0].transforms.len(), 2);
        assert_eq!(instance_groups[1].mesh_asset_id, 9);
        assert_eq!(instance_groups[1].transforms.len(), 1);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let groups = vec![group(shape_key(1, 0, 1), 1.0, 0, 0)];
        let instance_groups = build_instance_groups(&groups, &[], &[]);
        assert!(instance_groups.is_empty());
    }
}
