use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::error;

use archive_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload carries `resource: null` so clients can key on it.
    #[error("{message}")]
    NotFound {
        resource: &'static str,
        message: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, payload) = match self {
            ApiError::NotFound { resource, message } => {
                let mut payload = Map::new();
                payload.insert(resource.to_string(), Value::Null);
                (StatusCode::NOT_FOUND, message, payload)
            }
            ApiError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message, Map::new()),
            ApiError::Storage(e) => {
                error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into(), Map::new())
            }
            ApiError::Internal(e) => {
                error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into(), Map::new())
            }
        };

        (status, Json(json!({ "message": message, "payload": payload }))).into_response()
    }
}
