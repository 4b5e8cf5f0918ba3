//! Error types for the path-trace backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("path tracer has no attached GPU context")]
    NoGpuContext,
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TraceError>;
