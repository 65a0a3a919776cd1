use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the offer and claim services.
///
/// Every variant maps to exactly one HTTP status; storage failures are
/// reported to the client as a generic 500 and only their details are logged.
#[derive(Debug, Error)]
pub enum OfferError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("invariant violation: {0}")]
    Internal(String),

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type OfferResult<T> = Result<T, OfferError>;

impl OfferError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to the client.
    fn public_message(&self) -> String {
        match self {
            Self::InvalidArgument(m) | Self::NotFound(m) | Self::Conflict(m) => m.clone(),
            Self::Internal(_) | Self::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for OfferError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self:#}");
        } else {
            tracing::debug!("request rejected ({status}): {self}");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
