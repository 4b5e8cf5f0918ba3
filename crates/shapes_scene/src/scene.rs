//! Scene and evaluation kernel — spec §4.4.
//!
//! Grounded on `original_source/src/core/scene.cpp`'s `Execute`,
//! `RegenerateSubgraph`, `RebuildSubgraph`, `AddOutputToScene` and
//! `myth_scene::manager::SceneManager` for the owning-container idiom.

use crate::behavior::behavior_for;
use crate::kind::ObjectKind;
use crate::object::Object;
use shapes_assets::Registry;
use shapes_core::ObjectId;
use shapes_resources::ShapeBuffer;

pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub time: f32,
    pub seed: u64,
    registry: Registry<Object>,
    scene_list: Vec<ObjectId>,
}

impl Default for Scene {
    fn default() -> Self {
        Scene { width: 1920, height: 1080, time: 0.0, seed: 0, registry: Registry::new(), scene_list: Vec::new() }
    }
}

impl Scene {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Scene { width, height, ..Self::default() }
    }

    pub fn add_object(&mut self, name: impl Into<String>, kind: ObjectKind) -> ObjectId {
        let name = name.into();
        let placeholder = Object::new(ObjectId::NULL, name.clone(), kind);
        let id = self.registry.add(name, placeholder);
        if let Some(obj) = self.registry.get_mut(id) {
            obj.id = id;
        }
        id
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.registry.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.registry.get_mut(id)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.registry.find(name)
    }

    #[must_use]
    pub fn scene_list(&self) -> &[ObjectId] {
        &self.scene_list
    }

    /// `CreateOutput(type)` (spec §4.2) — registers a new `<name>_S` asset
    /// of `kind` and wires it as `obj`'s output slot, unless one already
    /// exists (re-`Generate`s reuse the same container rather than
    /// churning the registry every frame). Returns the output's id.
    pub fn create_output(&mut self, id: ObjectId, kind: ObjectKind) -> ObjectId {
        if let Some(obj) = self.registry.get(id) {
            if !obj.output.is_null() {
                return obj.output;
            }
        }
        let name = self
            .registry
            .name_of(id)
            .map(|s| format!("{s}_S"))
            .unwrap_or_else(|| "_S".to_string());
        let mut out = Object::new(ObjectId::NULL, name.clone(), kind);
        if kind == ObjectKind::Shapes {
            out.shape_buffer = Some(ShapeBuffer::new());
        }
        let out_id = self.registry.add(name, out);
        if let Some(out_obj) = self.registry.get_mut(out_id) {
            out_obj.id = out_id;
        }
        if let Some(obj) = self.registry.get_mut(id) {
            obj.output = out_id;
        }
        out_id
    }

    /// `AddOutputToScene(obj)` — propagates the local transform to `obj`'s
    /// output and inserts it into the scene list if not already present.
    pub fn add_output_to_scene(&mut self, obj_id: ObjectId) {
        let Some(obj) = self.registry.get(obj_id) else { return };
        let output = obj.output;
        if output.is_null() {
            return;
        }
        let parent_xform = obj.transform;
        if let Some(out_obj) = self.registry.get_mut(output) {
            out_obj.transform = parent_xform;
        }
        if !self.scene_list.contains(&output) {
            self.scene_list.push(output);
        }
    }

    /// Forward dirty propagation (spec §3.1: "marking a node dirty marks
    /// its output dirty, never its inputs"). Only the producer→its-own-
    /// output edge is walked; a node's consumers are not transitively
    /// re-dirtied by this call — they re-observe the new result the next
    /// time they run, per their own dirty/time-range state.
    pub fn mark_dirty(&mut self, id: ObjectId) {
        let Some(obj) = self.registry.get_mut(id) else { return };
        obj.mark.set_dirty(true);
        let output = obj.output;
        if !output.is_null() {
            self.mark_dirty(output);
        }
    }

    fn is_evaluable(&self, id: ObjectId) -> bool {
        self.registry.get(id).is_some_and(|o| o.visible && !o.kind.is_asset_leaf())
    }

    /// `Execute(advance, time, dt, debug)` — the fixed-point evaluator.
    pub fn execute(&mut self, advance: bool, time: f32, _dt: f32, _debug: bool) {
        if advance {
            self.time = time;
            for &id in self.scene_list.clone().iter() {
                let Some(obj) = self.registry.get_mut(id) else { continue };
                if !obj.visible || obj.kind.is_asset_leaf() || !obj.is_time_dependent() {
                    continue;
                }
                let in_range = time >= obj.time_range.0 && time <= obj.time_range.1;
                obj.mark.set_dirty(in_range);
            }
        }

        let mut prev_count: Option<usize> = None;
        loop {
            let dirty_ids: Vec<ObjectId> = self
                .scene_list
                .iter()
                .copied()
                .filter(|&id| self.is_evaluable(id) && self.registry.get(id).is_some_and(|o| o.mark.is_dirty()))
                .collect();
            let count = dirty_ids.len();
            if count == 0 {
                break;
            }
            if let Some(prev) = prev_count {
                if count >= prev {
                    log::debug!(
                        "scene evaluation fixed point: dirty count did not decrease ({prev} -> {count})"
                    );
                    break;
                }
            }
            prev_count = Some(count);
            let time = self.time;
            for id in dirty_ids {
                let Some(kind) = self.registry.get(id).map(|o| o.kind) else { continue };
                behavior_for(kind).run(self, id, time);
            }
        }
    }

    /// `RegenerateSubgraph(objs, seed, run)` — clears each node's output,
    /// seeds the `seed` parameter if present, invokes `Generate` then
    /// optionally `Run`, re-adds the (possibly new) output to the scene.
    pub fn regenerate_subgraph(&mut self, objs: &[ObjectId], seed: i32, run: bool) {
        let time = self.time;
        for &id in objs {
            let Some(kind) = self.registry.get(id).map(|o| o.kind) else { continue };
            if let Some(obj) = self.registry.get_mut(id) {
                if obj.params.slot_of("seed").is_some() {
                    let _ = obj.params.set_i("seed", 0, seed);
                }
            }
            let mut behavior = behavior_for(kind);
            behavior.generate(self, id);
            if run {
                behavior.run(self, id, time);
            }
            self.add_output_to_scene(id);
        }
    }

    /// `RebuildSubgraph(objs, seed)` — repeats `RegenerateSubgraph` until
    /// every node reports complete.
    pub fn rebuild_subgraph(&mut self, objs: &[ObjectId], seed: i32) {
        loop {
            self.regenerate_subgraph(objs, seed, true);
            let all_complete = objs.iter().all(|&id| {
                self.registry.get(id).is_some_and(|o| o.mark.is_complete())
            });
            if all_complete {
                break;
            }
        }
    }
}
