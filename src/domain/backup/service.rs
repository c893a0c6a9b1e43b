use super::error::BackupServiceError;
use super::template::render_readme;
use super::{PushBackupRequest, PushedRepo};
use crate::infrastructure::github::{GitHubApi, RepoSettings};
use async_trait::async_trait;
use std::sync::Arc;

/// Archives below this size are treated as an empty backup
pub const MIN_ARCHIVE_BYTES: usize = 128;

pub const README_PATH: &str = "README.md";
pub const ARCHIVE_PATH: &str = "backup.zip";
pub const COMMIT_MESSAGE: &str = ":memo: Update blog";

pub struct BackupService {
    github: Arc<dyn GitHubApi>,
}

impl BackupService {
    pub fn new(github: Arc<dyn GitHubApi>) -> Self {
        Self { github }
    }
}

#[async_trait]
pub trait BackupServiceApi: Send + Sync {
    /// Push a blog backup into the caller's own repository
    ///
    /// This operation:
    /// - Rejects trivially small archives before touching the network
    /// - Resolves the token owner
    /// - Creates the repository, or updates its metadata when it exists
    /// - Writes `README.md`, then the archive
    ///
    /// The first failing step aborts the rest; files already written stay.
    async fn push_blog_backup(
        &self,
        request: PushBackupRequest,
    ) -> Result<PushedRepo, BackupServiceError>;
}

#[async_trait]
impl BackupServiceApi for BackupService {
    async fn push_blog_backup(
        &self,
        request: PushBackupRequest,
    ) -> Result<PushedRepo, BackupServiceError> {
        // 1. Validate input
        self.validate(&request)?;

        // 2. Resolve identity
        let user = self
            .github
            .get_user(&request.access_token)
            .await
            .map_err(|e| BackupServiceError::Auth(e.to_string()))?;
        let repo_full_name = format!("{}/{}", user.login, request.repo_name);

        tracing::info!(
            repo = %repo_full_name,
            archive_size = request.archive.len(),
            "Pushing blog backup"
        );

        // 3. Ensure repository exists with current metadata
        let settings = RepoSettings {
            name: request.repo_name.clone(),
            description: request.repo_desc.clone(),
            homepage: Some(request.repo_homepage.clone()),
            has_wiki: false,
            has_issues: None,
        };
        self.github
            .create_or_update_repo(&request.access_token, &user.login, &settings)
            .await
            .map_err(|e| BackupServiceError::RepoOp(e.to_string()))?;

        // 4. Write README, then archive
        let readme = render_readme(&request.repo_readme, &repo_full_name);
        self.write_file(&request.access_token, &repo_full_name, README_PATH, readme.as_bytes())
            .await?;
        self.write_file(&request.access_token, &repo_full_name, ARCHIVE_PATH, &request.archive)
            .await?;

        tracing::info!(repo = %repo_full_name, "Pushed blog backup");

        Ok(PushedRepo {
            owner: user.login,
            repo_full_name,
        })
    }
}

impl BackupService {
    fn validate(&self, request: &PushBackupRequest) -> Result<(), BackupServiceError> {
        if request.archive.len() < MIN_ARCHIVE_BYTES {
            return Err(BackupServiceError::Validation("file is too small".to_string()));
        }
        if request.access_token.trim().is_empty() {
            return Err(BackupServiceError::Validation("access token is required".to_string()));
        }
        let name = request.repo_name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(BackupServiceError::Validation("invalid repo name".to_string()));
        }
        Ok(())
    }

    async fn write_file(
        &self,
        token: &str,
        repo_full_name: &str,
        path: &str,
        content: &[u8],
    ) -> Result<(), BackupServiceError> {
        self.github
            .upsert_file(token, repo_full_name, path, content, COMMIT_MESSAGE)
            .await
            .map_err(|e| BackupServiceError::from_file_write(path, e))
    }
}
