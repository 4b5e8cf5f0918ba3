//! Error types shared by the core id/parameter layer.
//!
//! Follows the teacher's single flat `thiserror` enum per crate; recoverable
//! conditions (asset-not-found, unbound inputs) are modeled as `Option`/`None`
//! elsewhere and never reach this type — only the spec's "fatal" kinds
//! (parameter type mismatch, malformed scene-file grammar) are errors here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("parameter '{name}' sub-index {index}: expected type {expected:?}, found {found:?}")]
    ParamTypeMismatch {
        name: String,
        index: usize,
        expected: crate::param::SubParamType,
        found: crate::param::SubParamType,
    },

    #[error("parameter '{name}' has no sub-index {index} (cnt={cnt})")]
    ParamIndexOutOfBounds { name: String, index: usize, cnt: usize },

    #[error("unknown parameter '{0}'")]
    UnknownParam(String),

    #[error("slot {slot} already has a parameter assigned (adding '{name}')")]
    ParamSlotInUse { slot: usize, name: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
