use super::{
    GitHubApi, GitHubError, GitHubUser, GitTree, PutContentRequest, RepoMetadata, RepoSettings,
    DEFAULT_BRANCH, USER_AGENT,
};
use async_trait::async_trait;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

const USER_TIMEOUT: Duration = Duration::from_secs(5);
const REPO_TIMEOUT: Duration = Duration::from_secs(5);
const TREE_TIMEOUT: Duration = Duration::from_secs(30);
const PUT_TIMEOUT: Duration = Duration::from_secs(2 * 60);

pub struct GitHubClient {
    api_url: String,
    http_client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str, token: &str, timeout: Duration) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}{}", self.api_url, path))
            .query(&[("access_token", token)])
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .timeout(timeout)
    }

    async fn patch_repo(
        &self,
        token: &str,
        repo_full_name: &str,
        settings: &RepoSettings,
    ) -> Result<RepoMetadata, GitHubError> {
        let response = self
            .request(Method::PATCH, &format!("/repos/{}", repo_full_name), token, REPO_TIMEOUT)
            .json(settings)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(repo = %repo_full_name, error = %e, "Update repo request failed");
                GitHubError::RepoOp(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = body_text(response).await;
            tracing::error!(
                repo = %repo_full_name,
                status = status.as_u16(),
                body = %body,
                "Update repo returned unexpected status"
            );
            return Err(GitHubError::RepoOp(format!("status code [{}]", status.as_u16())));
        }

        let repo: RepoMetadata = response
            .json()
            .await
            .map_err(|e| GitHubError::RepoOp(format!("failed to parse repo: {}", e)))?;

        tracing::info!(repo = %repo.full_name, "Updated repo");
        Ok(repo)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, token: &str) -> Result<GitHubUser, GitHubError> {
        let response = self
            .request(Method::GET, "/user", token, USER_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Get user request failed");
                GitHubError::Auth(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = body_text(response).await;
            tracing::error!(status = status.as_u16(), body = %body, "Get user returned unexpected status");
            return Err(GitHubError::Auth(format!("status code [{}]", status.as_u16())));
        }

        response
            .json::<GitHubUser>()
            .await
            .map_err(|e| GitHubError::Auth(format!("failed to parse user: {}", e)))
    }

    async fn create_or_update_repo(
        &self,
        token: &str,
        owner: &str,
        settings: &RepoSettings,
    ) -> Result<RepoMetadata, GitHubError> {
        let repo_full_name = format!("{}/{}", owner, settings.name);

        let response = self
            .request(Method::POST, "/user/repos", token, REPO_TIMEOUT)
            .json(settings)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(repo = %repo_full_name, error = %e, "Create repo request failed");
                GitHubError::RepoOp(e.to_string())
            })?;

        match response.status() {
            StatusCode::CREATED => {
                let repo: RepoMetadata = response
                    .json()
                    .await
                    .map_err(|e| GitHubError::RepoOp(format!("failed to parse repo: {}", e)))?;
                tracing::info!(repo = %repo.full_name, "Created repo");
                Ok(repo)
            }
            // The repository already exists
            StatusCode::UNPROCESSABLE_ENTITY => {
                self.patch_repo(token, &repo_full_name, settings).await
            }
            status => {
                let body = body_text(response).await;
                tracing::error!(
                    repo = %repo_full_name,
                    status = status.as_u16(),
                    body = %body,
                    "Create repo returned unexpected status"
                );
                Err(GitHubError::RepoOp(format!("status code [{}]", status.as_u16())))
            }
        }
    }

    async fn update_repo(
        &self,
        token: &str,
        repo_full_name: &str,
        settings: &RepoSettings,
    ) -> Result<RepoMetadata, GitHubError> {
        self.patch_repo(token, repo_full_name, settings).await
    }

    async fn get_tree(
        &self,
        token: &str,
        repo_full_name: &str,
    ) -> Result<HashMap<String, String>, GitHubError> {
        let path = format!("/repos/{}/git/trees/{}", repo_full_name, DEFAULT_BRANCH);
        let response = self
            .request(Method::GET, &path, token, TREE_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(repo = %repo_full_name, error = %e, "Get git tree request failed");
                GitHubError::TreeFetch(e.to_string())
            })?;

        match response.status() {
            StatusCode::OK => {
                let tree: GitTree = response
                    .json()
                    .await
                    .map_err(|e| GitHubError::TreeFetch(format!("failed to parse tree: {}", e)))?;
                if tree.truncated {
                    tracing::warn!(repo = %repo_full_name, "Git tree listing is truncated");
                }
                Ok(tree
                    .tree
                    .into_iter()
                    .map(|entry| (entry.path, entry.sha))
                    .collect())
            }
            // Empty repository, every write is a create
            StatusCode::NOT_FOUND | StatusCode::CONFLICT => Ok(HashMap::new()),
            status => {
                let body = body_text(response).await;
                tracing::error!(
                    repo = %repo_full_name,
                    status = status.as_u16(),
                    body = %body,
                    "Get git tree returned unexpected status"
                );
                Err(GitHubError::TreeFetch(format!("status code [{}]", status.as_u16())))
            }
        }
    }

    async fn put_file(
        &self,
        token: &str,
        repo_full_name: &str,
        path: &str,
        content: &[u8],
        message: &str,
        existing_sha: Option<String>,
    ) -> Result<(), GitHubError> {
        let body = PutContentRequest {
            message: message.to_string(),
            content: BASE64_STANDARD.encode(content),
            sha: existing_sha,
        };

        let response = self
            .request(
                Method::PUT,
                &format!("/repos/{}/contents/{}", repo_full_name, encode_path(path)),
                token,
                PUT_TIMEOUT,
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(repo = %repo_full_name, path = %path, error = %e, "Update file request failed");
                GitHubError::Write(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = body_text(response).await;
            tracing::error!(
                repo = %repo_full_name,
                path = %path,
                status = status.as_u16(),
                body = %body,
                "Update file returned unexpected status"
            );
            return Err(GitHubError::Write(format!(
                "file [{}] status code [{}]",
                path,
                status.as_u16()
            )));
        }

        tracing::info!(repo = %repo_full_name, path = %path, size = content.len(), "Updated file");
        Ok(())
    }
}

async fn body_text(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}

/// Percent-encode each segment of a repository path, keeping the separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
