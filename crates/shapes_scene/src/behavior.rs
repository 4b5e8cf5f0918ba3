//! Per-kind evaluation behavior — spec §4.2's `Define/Generate/Run/Sketch/
//! Select3D/Adjust3D` protocol.
//!
//! Every method takes `(&mut Scene, ObjectId)` rather than `&mut Object`:
//! `Generate` must be able to call [`Scene::create_output`], which inserts a
//! new object into the scene's registry, and `Run` writes into a *different*
//! object (the output container) than the one being evaluated. A single
//! `&mut Object` borrow cannot express either, so behaviors borrow the scene
//! and fetch whichever object they need, one borrow at a time.
//!
//! Kinds whose internal algorithm is out of this workspace's scope (the
//! wang-tile scatter density sampler, SPH/DEM particle kernels, BVH
//! skeletal animation and muscle binding — spec §1 Non-goals) still
//! participate in the graph: [`DefaultBehavior`] cleans them unconditionally,
//! so they behave as structurally-present, dirty-for-one-frame nodes
//! rather than missing functionality.

use crate::kind::ObjectKind;
use crate::scene::Scene;
use shapes_core::ObjectId;
use shapes_resources::ShapeKind;

/// Evaluation methods dispatched by [`ObjectKind`]. All methods default to
/// a no-op (or, for `run`, the spec-mandated clean-on-run) so that kinds
/// without specific behavior still satisfy the protocol.
pub trait ObjectBehavior {
    /// Declares input slots and parameter schema. Invoked once at creation.
    fn define(&mut self, _scene: &mut Scene, _id: ObjectId) {}

    /// Structural rebuild: ensures the node's output container exists.
    /// Returns `true` if a new output object was created.
    fn generate(&mut self, _scene: &mut Scene, _id: ObjectId) -> bool {
        false
    }

    /// Per-frame re-evaluation. Must leave the node clean on success;
    /// returning `false` leaves it dirty (self-dirtying fixed point,
    /// spec §9).
    fn run(&mut self, scene: &mut Scene, id: ObjectId, _time: f32) -> bool {
        if let Some(obj) = scene.object_mut(id) {
            obj.mark.set_dirty(false);
            obj.mark.set_complete(true);
        }
        true
    }

    /// Optional interactive viewport outline (spec §4.2: "optional
    /// interaction") — a no-op unless the kind draws one.
    fn sketch(&mut self, _scene: &Scene, _id: ObjectId, _width: u32, _height: u32) {}

    /// Optional 3D pick test against this node's current output.
    fn select_3d(&mut self, _scene: &Scene, _id: ObjectId) -> Option<ObjectId> {
        None
    }

    /// Optional interactive gizmo drag, applied to the node's own params.
    fn adjust_3d(&mut self, _scene: &mut Scene, _id: ObjectId) {}
}

/// Placeholder behavior used for every kind without a dedicated
/// implementation; implements the spec-mandated default (clean-on-run)
/// described above.
pub struct DefaultBehavior;

impl ObjectBehavior for DefaultBehavior {}

/// `MESH`'s behavior — spec §4.2's worked example. `Generate` ensures a
/// `Shapes`-kind output container exists (`CreateOutput`); `Run` resolves
/// the `mesh` and `material` inputs (`getInputTex`/`getInputMat`) and
/// writes one [`shapes_resources::Shape`] describing this node's instance.
pub struct MeshBehavior;

impl ObjectBehavior for MeshBehavior {
    fn generate(&mut self, scene: &mut Scene, id: ObjectId) -> bool {
        scene.create_output(id, ObjectKind::Shapes);
        true
    }

    fn run(&mut self, scene: &mut Scene, id: ObjectId, _time: f32) -> bool {
        let Some(obj) = scene.object(id) else { return false };
        let output = obj.output;
        let mesh_asset = obj.input_tex("mesh");
        let material_assets: Vec<ObjectId> = obj.input_mat("material").to_vec();
        let transform = obj.transform;

        let Some(out_obj) = scene.object_mut(output) else { return false };
        let buffer = out_obj.shape_buffer.get_or_insert_with(Default::default);
        buffer.clear();
        let (_, shape) = buffer.add();
        shape.set_kind(ShapeKind::Mesh);
        shape.pos = transform.pos.into();
        shape.rot = transform.rot.into();
        shape.scale = transform.scale.into();
        shape.pivot = transform.pivot.into();
        if let Some(mesh_id) = mesh_asset {
            shape.set_mesh_id(mesh_id.raw());
        }
        for (slot, mat_id) in material_assets.iter().take(4).enumerate() {
            shape.set_material_asset_id(slot, mat_id.raw() as u16);
        }

        out_obj.mark.set_dirty(false);
        out_obj.mark.set_complete(true);
        if let Some(obj) = scene.object_mut(id) {
            obj.mark.set_dirty(false);
            obj.mark.set_complete(true);
        }
        true
    }
}

/// Dispatches a kind to its [`ObjectBehavior`] implementation — the
/// per-kind method table spec §9's "tagged variant with a fixed method
/// table" calls for. Kinds with no shape-producing algorithm in this
/// workspace's scope fall back to [`DefaultBehavior`].
#[must_use]
pub fn behavior_for(kind: ObjectKind) -> Box<dyn ObjectBehavior> {
    match kind {
        ObjectKind::Mesh => Box::new(MeshBehavior),
        _ => Box::new(DefaultBehavior),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::InputType;

    #[test]
    fn default_behavior_cleans_on_run() {
        let mut scene = Scene::new(64, 64);
        let id = scene.add_object("x", ObjectKind::Module);
        let mut behavior = DefaultBehavior;
        assert!(scene.object(id).unwrap().mark.is_dirty());
        behavior.run(&mut scene, id, 0.0);
        assert!(!scene.object(id).unwrap().mark.is_dirty());
        assert!(scene.object(id).unwrap().mark.is_complete());
    }

    #[test]
    fn mesh_behavior_generates_output_and_writes_shape() {
        let mut scene = Scene::new(64, 64);
        let mesh_asset = scene.add_object("some_mesh", ObjectKind::Image);
        let id = scene.add_object("m", ObjectKind::Mesh);
        scene.object_mut(id).unwrap().declare_input("mesh", InputType::Asset);
        scene.object_mut(id).unwrap().set_input("mesh", mesh_asset);

        let mut behavior = MeshBehavior;
        behavior.generate(&mut scene, id);
        let output = scene.object(id).unwrap().output;
        assert!(!output.is_null());

        behavior.run(&mut scene, id, 0.0);
        let out_obj = scene.object(output).unwrap();
        let buffer = out_obj.shape_buffer.as_ref().expect("mesh run populates a shape buffer");
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.as_slice()[0].kind(), ShapeKind::Mesh);
        assert_eq!(buffer.as_slice()[0].mesh_id(), mesh_asset.raw());
    }

    #[test]
    fn behavior_for_dispatches_mesh_kind() {
        let mut scene = Scene::new(64, 64);
        let id = scene.add_object("m", ObjectKind::Mesh);
        let mut behavior = behavior_for(scene.object(id).unwrap().kind);
        behavior.generate(&mut scene, id);
        assert!(!scene.object(id).unwrap().output.is_null());
    }
}
