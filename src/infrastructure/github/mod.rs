pub mod client;
pub mod model;

pub use client::GitHubClient;
pub use model::{GitHubUser, GitTree, PutContentRequest, RepoMetadata, RepoSettings, TreeEntry};

use async_trait::async_trait;
use std::collections::HashMap;

pub const USER_AGENT: &str = "Octocat/1.0.0; +https://github.com/b3log/octocat";

/// Branch whose tree is listed before each content write
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum GitHubError {
    #[error("get user failed: {0}")]
    Auth(String),
    #[error("create or update repo failed: {0}")]
    RepoOp(String),
    #[error("get git tree failed: {0}")]
    TreeFetch(String),
    #[error("update file failed: {0}")]
    Write(String),
}

/// Operations issued against the GitHub REST API.
///
/// Every call carries the caller's access token verbatim; nothing here
/// validates it beyond what GitHub answers.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Resolve the identity behind an access token (`GET /user`)
    async fn get_user(&self, token: &str) -> Result<GitHubUser, GitHubError>;

    /// Create the repository, or patch it with the same settings when it
    /// already exists
    async fn create_or_update_repo(
        &self,
        token: &str,
        owner: &str,
        settings: &RepoSettings,
    ) -> Result<RepoMetadata, GitHubError>;

    /// Patch an existing repository's metadata
    async fn update_repo(
        &self,
        token: &str,
        repo_full_name: &str,
        settings: &RepoSettings,
    ) -> Result<RepoMetadata, GitHubError>;

    /// List the default branch tree as `path -> sha`.
    ///
    /// An empty or missing repository yields an empty map.
    async fn get_tree(
        &self,
        token: &str,
        repo_full_name: &str,
    ) -> Result<HashMap<String, String>, GitHubError>;

    /// Write a file. `existing_sha` must be the current blob sha when the
    /// path already exists, `None` to create it.
    async fn put_file(
        &self,
        token: &str,
        repo_full_name: &str,
        path: &str,
        content: &[u8],
        message: &str,
        existing_sha: Option<String>,
    ) -> Result<(), GitHubError>;

    /// Overwrite one file: look up its current sha in the tree, then put.
    async fn upsert_file(
        &self,
        token: &str,
        repo_full_name: &str,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<(), GitHubError> {
        let mut tree = self.get_tree(token, repo_full_name).await?;
        let existing_sha = tree.remove(path);

        tracing::debug!(
            repo = %repo_full_name,
            path = %path,
            update = existing_sha.is_some(),
            "Writing file"
        );

        self.put_file(token, repo_full_name, path, content, message, existing_sha)
            .await
    }
}
