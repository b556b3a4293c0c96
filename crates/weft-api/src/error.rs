use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use weft_engine::EngineError;
use weft_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Store(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::ThreadNotFound(_) => "ThreadNotFound",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::Store(_) => "StoreError",
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ThreadNotFound(id) => ApiError::ThreadNotFound(id),
            EngineError::BadRequest(message) => ApiError::BadRequest(message),
            EngineError::Store(message) => ApiError::Store(message),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ThreadNotFound(id) => ApiError::ThreadNotFound(id),
            other => ApiError::Store(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::ThreadNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(ref e) => {
                tracing::error!("Storage error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "type": self.kind(),
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_not_found_maps_to_api_not_found() {
        let err: ApiError = EngineError::ThreadNotFound("thread_1".to_string()).into();
        assert!(matches!(err, ApiError::ThreadNotFound(id) if id == "thread_1"));
    }

    #[test]
    fn test_kind_names_variant() {
        let err = ApiError::BadRequest("nope".to_string());
        assert_eq!(err.kind(), "BadRequest");
    }
}
