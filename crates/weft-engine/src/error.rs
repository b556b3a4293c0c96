use thiserror::Error;
use weft_store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage failure: {0}")]
    Store(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ThreadNotFound(id) => EngineError::ThreadNotFound(id),
            other => EngineError::Store(other.to_string()),
        }
    }
}
