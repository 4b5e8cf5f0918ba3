//! Object base — spec §4.2.
//!
//! Grounded on `original_source/src/core/object.h`'s `Object` class (input
//! list, single output slot, param bag, transform) and spec §9 Design
//! Notes' "tagged variant" redesign.

use crate::kind::ObjectKind;
use crate::transform::Transform;
use shapes_core::{Mark, ObjectId, ParamStore, OBJ_NULL};
use shapes_resources::ShapeBuffer;

/// The expected producer type of a declared input. `List` is variadic:
/// further `set_input` calls append rather than replace (spec §4.2).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputType {
    Asset,
    Computed,
    Time,
    List,
}

#[derive(Clone, Debug)]
pub struct InputSlot {
    pub name: String,
    pub expected: InputType,
    pub connected: Vec<ObjectId>,
}

impl InputSlot {
    #[must_use]
    pub fn new(name: impl Into<String>, expected: InputType) -> Self {
        InputSlot { name: name.into(), expected, connected: Vec::new() }
    }

    #[must_use]
    pub fn is_time_dependent(&self) -> bool {
        self.expected == InputType::Time
    }
}

/// A scene-graph node. Every field the reference's `Object` base class
/// exposes directly (no inheritance — `kind` dispatches to per-kind
/// behavior via [`crate::behavior::ObjectBehavior`]).
#[derive(Clone, Debug)]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub mark: Mark,
    pub visible: bool,
    pub inputs: Vec<InputSlot>,
    pub output: ObjectId,
    pub params: ParamStore,
    pub transform: Transform,
    pub time_range: (f32, f32),
    /// Populated only for output containers ([`Scene::create_output`]
    /// always creates these as `ObjectKind::Shapes`) — the shape data a
    /// node's behavior writes on `Run` (spec §4.3).
    pub shape_buffer: Option<ShapeBuffer>,
}

impl Object {
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<String>, kind: ObjectKind) -> Self {
        Object {
            id,
            name: name.into(),
            kind,
            mark: Mark::fresh(),
            visible: true,
            inputs: Vec::new(),
            output: ObjectId::from(OBJ_NULL),
            params: ParamStore::new(),
            transform: Transform::default(),
            time_range: (0.0, f32::MAX),
            shape_buffer: None,
        }
    }

    /// An object is time-dependent iff its input list's first slot (spec
    /// §3.1 invariant: `time` must appear at index 0 when present) is typed
    /// `Time`.
    #[must_use]
    pub fn is_time_dependent(&self) -> bool {
        self.inputs.first().is_some_and(InputSlot::is_time_dependent)
    }

    pub fn declare_input(&mut self, name: impl Into<String>, expected: InputType) -> &mut InputSlot {
        self.inputs.push(InputSlot::new(name, expected));
        self.inputs.last_mut().expect("just pushed")
    }

    /// `SetInput(name, assetId)` — eager resolution is the caller's job
    /// (it needs the registry); this only wires the id once resolved.
    pub fn set_input(&mut self, name: &str, resolved: ObjectId) {
        if let Some(slot) = self.inputs.iter_mut().find(|s| s.name == name) {
            if slot.expected == InputType::List {
                slot.connected.push(resolved);
            } else {
                slot.connected = vec![resolved];
            }
        }
    }

    #[must_use]
    pub fn input(&self, name: &str) -> Option<ObjectId> {
        self.inputs.iter().find(|s| s.name == name)?.connected.first().copied()
    }

    #[must_use]
    pub fn input_list(&self, name: &str) -> &[ObjectId] {
        self.inputs
            .iter()
            .find(|s| s.name == name)
            .map_or(&[], |s| s.connected.as_slice())
    }

    /// `getInputTex(name)` (spec §4.2) — the connected asset id for a
    /// texture-typed input. Backend resolution into a GPU handle happens
    /// later, at sync time (spec §4.6), not here.
    #[must_use]
    pub fn input_tex(&self, name: &str) -> Option<ObjectId> {
        self.input(name)
    }

    /// `getInputMat(name)` (spec §4.2) — the connected material handles for
    /// a (possibly list-typed) material input.
    #[must_use]
    pub fn input_mat(&self, name: &str) -> &[ObjectId] {
        self.input_list(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_input_must_be_first_to_count() {
        let mut obj = Object::new(ObjectId::new(0), "A", ObjectKind::Heightfield);
        obj.declare_input("mesh", InputType::Asset);
        obj.declare_input("time", InputType::Time);
        assert!(!obj.is_time_dependent());

        let mut obj2 = Object::new(ObjectId::new(1), "B", ObjectKind::Heightfield);
        obj2.declare_input("time", InputType::Time);
        obj2.declare_input("mesh", InputType::Asset);
        assert!(obj2.is_time_dependent());
    }

    #[test]
    fn list_input_appends() {
        let mut obj = Object::new(ObjectId::new(0), "A", ObjectKind::Instance);
        obj.declare_input("items", InputType::List);
        obj.set_input("items", ObjectId::new(5));
        obj.set_input("items", ObjectId::new(6));
        assert_eq!(obj.input_list("items"), &[ObjectId::new(5), ObjectId::new(6)]);
    }
}
