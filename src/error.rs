use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Outcome classification for calls against the remote backend.
///
/// Pages surface a different message for each variant: a rejection means the
/// backend answered and said no (unknown email, bad credentials), while
/// unreachable means the request itself failed (refused connection, DNS,
/// or an unreadable response body).
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend rejected the request with status {0}")]
    Rejected(StatusCode),

    #[error("backend unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
}

/// Page-level failures that cannot be rendered inline.
///
/// Almost every backend failure is caught by its handler and shown as an
/// inline message; this is the backstop for the few handlers that propagate
/// instead (the chart image), so no failure can escape as a panic.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),

    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
