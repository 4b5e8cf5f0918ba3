use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("no backend registered for output id {0}")]
    UnknownBackend(i32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;
