use super::error::AwesomeServiceError;
use super::renderer::{ReadmeRenderer, TIMESTAMP_FORMAT};
use crate::domain::blog::BlogRegistry;
use crate::infrastructure::github::{GitHubApi, RepoSettings};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

pub const SHOWCASE_README_PATH: &str = "README.md";

/// Result of one aggregation cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Nothing to render, the showcase was left untouched
    Skipped,
    Published { blog_count: usize, article_count: u64 },
}

pub struct AwesomeService {
    github: Arc<dyn GitHubApi>,
    registry: Arc<BlogRegistry>,
    renderer: ReadmeRenderer,
    org_access_token: String,
    showcase_repo: String,
    period: Duration,
}

impl AwesomeService {
    pub fn new(
        github: Arc<dyn GitHubApi>,
        registry: Arc<BlogRegistry>,
        org_access_token: String,
        showcase_repo: String,
        title_max_chars: usize,
        period: Duration,
    ) -> Self {
        Self {
            github,
            registry,
            renderer: ReadmeRenderer::new(title_max_chars),
            org_access_token,
            showcase_repo,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Render the registry and push it as the showcase README, then refresh
    /// the showcase description with the current counts.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, AwesomeServiceError> {
        let blogs = self.registry.snapshot_all();

        let now = Utc::now();
        let next_refresh = now
            + chrono::Duration::from_std(self.period).unwrap_or_else(|_| chrono::Duration::hours(6));

        let Some(readme) = self.renderer.render(&blogs, now, next_refresh) else {
            tracing::info!(registered = blogs.len(), "No blogs to render, skipping showcase refresh");
            return Ok(CycleOutcome::Skipped);
        };

        tracing::debug!(content = %readme.content, "Rendered showcase README");

        let message = format!(
            ":memo: Scheduled refresh {}, next refresh at {}",
            now.format(TIMESTAMP_FORMAT),
            next_refresh.format(TIMESTAMP_FORMAT)
        );
        self.github
            .upsert_file(
                &self.org_access_token,
                &self.showcase_repo,
                SHOWCASE_README_PATH,
                readme.content.as_bytes(),
                &message,
            )
            .await?;

        self.update_description(readme.blog_count, readme.article_count)
            .await?;

        tracing::info!(
            repo = %self.showcase_repo,
            blog_count = readme.blog_count,
            article_count = readme.article_count,
            "Refreshed showcase"
        );

        Ok(CycleOutcome::Published {
            blog_count: readme.blog_count,
            article_count: readme.article_count,
        })
    }

    async fn update_description(
        &self,
        blog_count: usize,
        article_count: u64,
    ) -> Result<(), AwesomeServiceError> {
        let name = self
            .showcase_repo
            .rsplit('/')
            .next()
            .unwrap_or(self.showcase_repo.as_str())
            .to_string();

        let settings = RepoSettings {
            name,
            description: format!(
                "🎸 Showcase of beautiful Solo blogs! {} sites and {} articles so far 📈",
                blog_count, article_count
            ),
            homepage: None,
            has_wiki: false,
            has_issues: Some(true),
        };

        self.github
            .update_repo(&self.org_access_token, &self.showcase_repo, &settings)
            .await?;
        Ok(())
    }
}
