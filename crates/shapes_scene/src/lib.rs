//! Object graph and evaluation kernel for the Shapes engine (spec
//! components B and D).

pub mod behavior;
pub mod error;
pub mod kind;
pub mod object;
pub mod scene;
pub mod transform;

pub use behavior::{behavior_for, DefaultBehavior, MeshBehavior, ObjectBehavior};
pub use error::{Result, SceneError};
pub use kind::ObjectKind;
pub use object::{InputSlot, InputType, Object};
pub use scene::Scene;
pub use transform::Transform;
