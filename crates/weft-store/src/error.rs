use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Internal storage error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
