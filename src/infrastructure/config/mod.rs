use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SHOWCASE_REPO: &str = "b3log/awesome-solo";

/// One year; longer periods would overflow the scheduler's deadline
pub const MAX_REFRESH_MINUTES: u64 = 365 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // GitHub
    pub github_api_url: String,
    pub org_access_token: Option<String>,
    // Awesome list
    pub showcase_repo: String,
    pub awesome_refresh_minutes: u64,
    pub awesome_title_max_chars: usize,
    // Uploads
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "1123".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            org_access_token: env::var("ORG_ACCESS_TOKEN")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            showcase_repo: env::var("SHOWCASE_REPO")
                .unwrap_or_else(|_| DEFAULT_SHOWCASE_REPO.to_string()),
            awesome_refresh_minutes: env::var("AWESOME_REFRESH_MINUTES")
                .unwrap_or_else(|_| "360".to_string())
                .parse()?,
            awesome_title_max_chars: env::var("AWESOME_TITLE_MAX_CHARS")
                .unwrap_or_else(|_| "26".to_string())
                .parse()?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (64 * 1024 * 1024).to_string())
                .parse()?,
        };

        if !config.showcase_repo.contains('/') {
            return Err(format!(
                "SHOWCASE_REPO must be of the form owner/repo, got [{}]",
                config.showcase_repo
            )
            .into());
        }

        if config.awesome_refresh_minutes > MAX_REFRESH_MINUTES {
            return Err(format!(
                "AWESOME_REFRESH_MINUTES must be at most {}, got [{}]",
                MAX_REFRESH_MINUTES, config.awesome_refresh_minutes
            )
            .into());
        }

        Ok(config)
    }

    /// The aggregator only runs when an organization token is configured
    pub fn awesome_enabled(&self) -> bool {
        self.org_access_token.is_some()
    }

    pub fn awesome_period(&self) -> Duration {
        let minutes = self.awesome_refresh_minutes.clamp(1, MAX_REFRESH_MINUTES);
        Duration::from_secs(minutes * 60)
    }
}
