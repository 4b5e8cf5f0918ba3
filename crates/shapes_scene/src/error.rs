//! Error taxonomy for the scene/evaluation kernel — spec §7.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown object type name '{0}'")]
    UnknownTypeName(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
