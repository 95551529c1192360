use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcmsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The demo view was torn down while an operation was pending.
    #[error("Demo view is closed")]
    ViewClosed,

    /// A simulated job is already running.
    #[error("Busy: {0}")]
    Busy(String),
}

pub type Result<T> = std::result::Result<T, AcmsError>;

/// Error type returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_)    => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_)  => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_)    => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_)    => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AcmsError> for ApiError {
    fn from(err: AcmsError) -> Self {
        match err {
            AcmsError::ViewClosed => ApiError::Unavailable(err.to_string()),
            AcmsError::Busy(msg)  => ApiError::Conflict(msg),
            other                 => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
