use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Result code reported to Solo when a push succeeds.
pub const CODE_OK: i32 = 0;

/// Result code reported to Solo for any failure.
pub const CODE_FAILED: i32 = -1;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    RepoOp(String),

    #[error("{0}")]
    TreeFetch(String),

    #[error("{0}")]
    Write(String),

    #[error("{0}")]
    Internal(String),
}

/// Fixed-shape result object returned by the upload endpoint.
///
/// Solo inspects `code`, never the HTTP status.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PushResult {
    pub code: i32,
    pub msg: String,
}

impl PushResult {
    pub fn ok() -> Self {
        Self {
            code: CODE_OK,
            msg: String::new(),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_FAILED,
            msg: msg.into(),
        }
    }
}

impl AppError {
    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Auth(_) => "auth",
            Self::RepoOp(_) => "repo_op",
            Self::TreeFetch(_) => "tree_fetch",
            Self::Write(_) => "write",
            Self::Internal(_) => "internal",
        }
    }

    pub fn to_response(&self) -> PushResult {
        PushResult::failed(self.to_string())
    }
}

/// Failures are always answered with HTTP 200, the outcome lives in the body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            error = %self,
            kind = self.kind(),
            "Request failed"
        );

        (StatusCode::OK, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
