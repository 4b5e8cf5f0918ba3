//! Cross-crate integration: the same scene graph output, routed through
//! both backends via the render coordinator (spec §8's end-to-end
//! scenarios and the `SetRenderer` round-trip invariant).

use glam::Mat4;
use shapes::{Backend, RasterBackend, RenderCoordinator, ShapeBuffer, ShapeKind, ShapeSource, TraceBackend};

struct NoGroups;
impl ShapeSource for NoGroups {
    fn container(&self, _asset_id: i32) -> Option<&ShapeBuffer> {
        None
    }
}

fn two_group_scene() -> ShapeBuffer {
    let mut root = ShapeBuffer::new();
    for i in 0..100 {
        let (_, s) = root.add();
        s.set_kind(ShapeKind::Mesh);
        if i % 2 == 0 {
            s.set_mesh_id(10);
            s.set_material_asset_id(0, 1);
        } else {
            s.set_mesh_id(20);
            s.set_material_asset_id(0, 2);
        }
    }
    root
}

#[test]
fn rasterizer_and_tracer_agree_on_group_shape_from_the_same_scene() {
    let root = two_group_scene();

    let mut raster = RasterBackend::new(0);
    raster.sync_shapes(&root, Mat4::IDENTITY, &NoGroups);
    assert_eq!(raster.draw_list().len(), 2);

    let mut trace = TraceBackend::new(1, 16, 64, 64);
    trace.sync_shapes(&root, Mat4::IDENTITY, &NoGroups, |_material| true);
    assert_eq!(trace.instance_groups().len(), 2);
    for group in trace.instance_groups() {
        assert_eq!(group.transforms.len(), 50);
    }
}

#[test]
fn coordinator_set_renderer_round_trip_preserves_each_backend() {
    let mut coordinator = RenderCoordinator::new(0);
    coordinator.register_backend(0, Box::new(RasterBackend::new(0)));
    coordinator.register_backend(1, Box::new(TraceBackend::new(1, 4, 32, 32)));

    assert_eq!(coordinator.current_output_id(), 0);
    coordinator.set_renderer(1).unwrap();
    assert_eq!(coordinator.current_output_id(), 1);
    coordinator.set_renderer(0).unwrap();
    assert_eq!(coordinator.current_output_id(), 0);

    // The rasterizer is single-pass; one `render` call always completes.
    assert!(coordinator.render(64, 64, false).unwrap());
}

#[test]
fn progressive_backend_only_completes_after_its_sample_budget() {
    let mut coordinator = RenderCoordinator::new(5);
    coordinator.register_backend(5, Box::new(TraceBackend::new(5, 3, 16, 16)));

    assert!(!coordinator.render(16, 16, false).unwrap());
    assert!(!coordinator.render(16, 16, false).unwrap());
    assert!(coordinator.render(16, 16, false).unwrap());
}

#[test]
fn unknown_backend_id_is_rejected() {
    let mut coordinator = RenderCoordinator::new(0);
    coordinator.register_backend(0, Box::new(RasterBackend::new(0)));
    assert!(coordinator.set_renderer(42).is_err());
}
