//! Core utilities and foundational types for the Shapes engine.
//!
//! This crate holds the pieces every other layer depends on: stable object
//! ids and their sentinels (§3.1), dirty/clean/complete marks (§4.2), the
//! typed parameter store (§3.3), name interning, and the crate's error type.
//! It has no knowledge of scenes, shapes, or GPU resources — those live in
//! `shapes_resources`, `shapes_scene`, and `shapes_render`.

pub mod error;
pub mod ids;
pub mod interner;
pub mod mark;
pub mod param;

pub use error::{CoreError, Result};
pub use ids::{ObjectId, TypeTag, OBJ_NULL, OBJ_SHAPEGRP};
pub use interner::NameInterner;
pub use mark::Mark;
pub use param::{Param, ParamStore, SubParamType, SubParamValue};
