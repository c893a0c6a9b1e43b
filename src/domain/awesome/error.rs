use crate::infrastructure::github::GitHubError;

#[derive(Debug, thiserror::Error)]
pub enum AwesomeServiceError {
    #[error("get git tree of showcase README failed: {0}")]
    TreeFetch(String),
    #[error("update showcase README failed: {0}")]
    Write(String),
    #[error("update showcase repo failed: {0}")]
    RepoOp(String),
}

impl From<GitHubError> for AwesomeServiceError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::TreeFetch(msg) => Self::TreeFetch(msg),
            GitHubError::RepoOp(msg) => Self::RepoOp(msg),
            GitHubError::Write(msg) | GitHubError::Auth(msg) => Self::Write(msg),
        }
    }
}
