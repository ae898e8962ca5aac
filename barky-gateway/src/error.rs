//! Error types for the gateway crate.

use std::path::PathBuf;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use barky_core::StoreError;
use serde_json::json;

/// Errors that can occur while handling a request or persisting the store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// An error propagated from the resource store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body or path is malformed or missing required fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The snapshot file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl GatewayError {
    /// HTTP status this error is reported with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            GatewayError::Store(StoreError::DuplicateIdentifier { .. }) => StatusCode::CONFLICT,
            GatewayError::Store(
                StoreError::Validation(_) | StoreError::ReferentialFailure { .. },
            )
            | GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Store(_)
            | GatewayError::Persistence { .. }
            | GatewayError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
