pub mod error;
pub mod service;
pub mod template;

pub use error::BackupServiceError;
pub use service::{BackupService, BackupServiceApi};

/// Fields of `POST /github/repos/solo` once the multipart body is read
#[derive(Debug, Clone, Default)]
pub struct PushBackupRequest {
    pub access_token: String,
    pub repo_name: String,
    pub repo_desc: String,
    pub repo_homepage: String,
    pub repo_readme: String,
    pub archive: Vec<u8>,
}

/// Outcome of a successful push
#[derive(Debug, Clone, PartialEq)]
pub struct PushedRepo {
    pub owner: String,
    pub repo_full_name: String,
}
