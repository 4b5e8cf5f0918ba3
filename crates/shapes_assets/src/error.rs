//! Error taxonomy for the asset registry — spec §7.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unknown object type tag '{0}'")]
    UnknownType(String),
    #[error("failed to read asset directory '{0}': {1}")]
    DirectoryScan(std::path::PathBuf, std::io::Error),
}

pub type Result<T> = std::result::Result<T, AssetError>;
