//! Error types for the render base (spec component E/F).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("shape container for asset id {0} not found")]
    MissingContainer(i32),
}

pub type Result<T> = std::result::Result<T, RenderError>;
