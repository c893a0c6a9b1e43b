use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Subset of the repository object returned by create/patch calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Body of `POST /user/repos` and `PATCH /repos/{owner}/{repo}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoSettings {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    pub has_wiki: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitTree {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub sha: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`
///
/// `sha` must be present when replacing an existing file and absent when
/// creating one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutContentRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}
