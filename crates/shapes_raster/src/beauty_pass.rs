//! Beauty pass draw-command derivation — spec §4.7 "Beauty pass".
//!
//! The per-group loop described in the spec reduces to a pure
//! transformation from sorted [`ShapeGroup`]s to a list of
//! [`DrawCommand`]s recording exactly when a shader-program switch is
//! required and which mesh needs its VBOs refreshed; actual `wgpu` calls
//! are issued by walking this list, not interleaved with the decision
//! logic, so the state-change bookkeeping stays testable without a
//! device. Grounded on `original_source/src/render/render_base.cpp`'s
//! beauty-pass loop and spec §5's ordering guarantee ("shader state
//! changes happen at most once per group").

use rustc_hash::FxHashSet;
use shapes_render::ShapeGroup;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DrawCommand {
    pub group_index: usize,
    pub shader: i32,
    pub bind_shader: bool,
    pub mesh_id: i32,
    pub upload_mesh: bool,
    pub instance_count: u32,
    pub base_instance: u32,
}

/// Walks `groups` in sort order, emitting one [`DrawCommand`] per
/// non-empty group. `bind_shader` is set whenever the shader differs from
/// the previous group's (spec: "if `g.shader != currentShader`: bind
/// program"); `upload_mesh` is set the first time a given `mesh_id` is
/// seen in this pass (spec: "if mesh dirty: upload VBOs; mark clean").
#[must_use]
pub fn build_draw_list(groups: &[ShapeGroup]) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(groups.len());
    let mut current_shader: Option<i32> = None;
    let mut uploaded = FxHashSet::default();

    for (index, group) in groups.iter().enumerate() {
        if group.count == 0 {
            continue;
        }
        let mesh_id = group.meshids.x as i32;
        let bind_shader = current_shader != Some(group.shader);
        current_shader = Some(group.shader);
        let upload_mesh = uploaded.insert(mesh_id);

        commands.push(DrawCommand {
            group_index: index,
            shader: group.shader,
            bind_shader,
            mesh_id,
            upload_mesh,
            instance_count: group.count,
            base_instance: group.offset,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use shapes_render::shape_key;

    fn group(key: u64, shader: i32, mesh: f32, count: u32, offset: u32) -> ShapeGroup {
        ShapeGroup {
            name: "g".into(),
            key,
            left: -1,
            right: -1,
            meshids: Vec4::new(mesh, 0.0, 0.0, 0.0),
            shader,
            count,
            offset,
        }
    }

    #[test]
    fn shader_binds_only_on_change() {
        let groups = vec![
            group(shape_key(1, 0, 1), 0, 1.0, 5, 0),
            group(shape_key(1, 0, 2), 0, 2.0, 3, 5),
            group(shape_key(2, 1, 3), 1, 3.0, 2, 8),
        ];
        let cmds = build_draw_list(&groups);
        assert_eq!(cmds.len(), 3);
        assert!(cmds[0].bind_shader);
        assert!(!cmds[1].bind_shader);
        assert!(cmds[2].bind_shader);
    }

    #[test]
    fn mesh_uploads_only_on_first_sight() {
        let groups = vec![
            group(shape_key(1, 0, 1), 0, 10.0, 5, 0),
            group(shape_key(2, 0, 1), 0, 10.0, 3, 5),
        ];
        let cmds = build_draw_list(&groups);
        assert!(cmds[0].upload_mesh);
        assert!(!cmds[1].upload_mesh);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let groups = vec![group(shape_key(1, 0, 1), 0, 1.0, 0, 0)];
        assert!(build_draw_list(&groups).is_empty());
    }
}
