//! Error types for the rasterizer backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("rasterizer has no attached GPU context")]
    NoGpuContext,
    #[error(transparent)]
    Pool(#[from] crate::resource_pools::PoolError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;
