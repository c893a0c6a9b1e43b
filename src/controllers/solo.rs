use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::{
        backup::{BackupService, BackupServiceApi, PushBackupRequest},
        blog::{BlogEntry, BlogRegistry, BlogStat},
    },
    error::{AppError, AppResult, PushResult},
};

/// Multipart form of `POST /github/repos/solo`
#[derive(Debug, Default)]
pub struct SoloUpload {
    pub ak: Option<String>,
    pub file: Option<Vec<u8>>,
    pub repo_name: String,
    pub repo_readme: String,
    pub repo_desc: String,
    pub repo_homepage: String,
    pub favicon: String,
    pub stat: String,
}

impl SoloUpload {
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut upload = SoloUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("read form failed: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("read file failed: {}", e)))?;
                upload.file = Some(data.to_vec());
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("read field [{}] failed: {}", name, e)))?;
            match name.as_str() {
                "ak" => upload.ak = Some(value),
                "repoName" => upload.repo_name = value,
                "repoReadme" => upload.repo_readme = value,
                "repoDesc" => upload.repo_desc = value,
                "repoHomepage" => upload.repo_homepage = value,
                "favicon" => upload.favicon = value,
                "stat" => upload.stat = value,
                _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
            }
        }

        Ok(upload)
    }

    fn into_request(self) -> AppResult<PushBackupRequest> {
        let access_token = self
            .ak
            .filter(|ak| !ak.trim().is_empty())
            .ok_or_else(|| AppError::Validation("access token is required".to_string()))?;
        let archive = self
            .file
            .ok_or_else(|| AppError::Validation("get file failed".to_string()))?;

        Ok(PushBackupRequest {
            access_token,
            repo_name: self.repo_name,
            repo_desc: self.repo_desc,
            repo_homepage: self.repo_homepage,
            repo_readme: self.repo_readme,
            archive,
        })
    }
}

pub struct SoloController {
    backup_service: Arc<BackupService>,
    registry: Arc<BlogRegistry>,
}

impl SoloController {
    pub fn new(backup_service: Arc<BackupService>, registry: Arc<BlogRegistry>) -> Self {
        Self {
            backup_service,
            registry,
        }
    }

    /// POST /github/repos/solo - Push a blog backup to the caller's repository
    pub async fn push_repos(
        State(controller): State<Arc<SoloController>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<Json<PushResult>> {
        let multipart =
            multipart.map_err(|e| AppError::Validation(format!("read form failed: {}", e)))?;
        let upload = SoloUpload::from_multipart(multipart).await?;

        let favicon = upload.favicon.trim().to_string();
        let stat = BlogStat::parse(&upload.stat);
        let request = upload.into_request()?;
        let title = request.repo_desc.clone();
        let homepage = request.repo_homepage.clone();

        let pushed = controller
            .backup_service
            .push_blog_backup(request)
            .await
            .map_err(AppError::from)?;

        controller.registry.upsert(BlogEntry {
            title,
            homepage,
            repo_full_name: pushed.repo_full_name,
            favicon: Some(favicon).filter(|f| !f.is_empty()),
            article_count: stat.article_count,
            last_update: stat.last_update(),
        });

        Ok(Json(PushResult::ok()))
    }
}
