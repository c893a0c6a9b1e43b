use crate::error::AppError;
use crate::infrastructure::github::GitHubError;

#[derive(Debug, thiserror::Error)]
pub enum BackupServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("get user failed")]
    Auth(String),
    #[error("create or update repo failed")]
    RepoOp(String),
    #[error("get git tree of file [{path}] failed")]
    TreeFetch { path: String, reason: String },
    #[error("update file [{path}] failed")]
    Write { path: String, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackupServiceError {
    /// Attach the file being written to a failure from the tree-then-put step
    pub fn from_file_write(path: &str, err: GitHubError) -> Self {
        match err {
            GitHubError::TreeFetch(reason) => Self::TreeFetch {
                path: path.to_string(),
                reason,
            },
            GitHubError::Write(reason) => Self::Write {
                path: path.to_string(),
                reason,
            },
            other => Self::Write {
                path: path.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<BackupServiceError> for AppError {
    fn from(err: BackupServiceError) -> Self {
        let msg = err.to_string();
        match err {
            BackupServiceError::Validation(_) => AppError::Validation(msg),
            BackupServiceError::Auth(_) => AppError::Auth(msg),
            BackupServiceError::RepoOp(_) => AppError::RepoOp(msg),
            BackupServiceError::TreeFetch { .. } => AppError::TreeFetch(msg),
            BackupServiceError::Write { .. } => AppError::Write(msg),
            BackupServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
