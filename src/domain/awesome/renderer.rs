use super::sanitize::sanitize;
use crate::domain::blog::BlogEntry;
use chrono::{DateTime, Utc};

/// Favicons containing this marker are Solo's stock icon and are not shown
pub const PLACEHOLDER_FAVICON_MARKER: &str = "solo-";

/// Image-processing suffix some CDNs leave in favicon URLs
pub const FAVICON_PATH_ARTIFACT: &str = "/interlace/0";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TABLE_HEADER: &str = "| Icon | Title | Link | Articles | Repo |\n| :---: | --- | --- | --- | :---: |\n";

/// One rendered row of the awesome list
#[derive(Debug, Clone, PartialEq)]
pub struct BlogRow {
    pub favicon: String,
    pub title: String,
    pub homepage: String,
    pub article_count: Option<u64>,
    pub repo_full_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReadme {
    pub content: String,
    pub blog_count: usize,
    pub article_count: u64,
}

pub struct ReadmeRenderer {
    title_max_chars: usize,
}

impl ReadmeRenderer {
    pub fn new(title_max_chars: usize) -> Self {
        Self { title_max_chars }
    }

    /// Render the table for `blogs` in the given order.
    ///
    /// Returns `None` when no entry survives filtering.
    pub fn render(
        &self,
        blogs: &[BlogEntry],
        now: DateTime<Utc>,
        next_refresh: DateTime<Utc>,
    ) -> Option<RenderedReadme> {
        let rows: Vec<BlogRow> = blogs.iter().filter_map(|b| self.row(b)).collect();
        if rows.is_empty() {
            return None;
        }

        let mut content = String::from(TABLE_HEADER);
        for row in &rows {
            content.push_str(&format!(
                "| {} | {} | {} | {} | [:octocat:](https://github.com/{}) |\n",
                row.favicon,
                row.title,
                row.homepage,
                row.article_count.map(|n| n.to_string()).unwrap_or_default(),
                row.repo_full_name
            ));
        }

        content.push_str("\nNotes:\n\n");
        content.push_str("* Blogs are listed by most recent article, newest first\n");
        content.push_str(&format!(
            "* Refreshed automatically by [Octocat](https://github.com/b3log/octocat) at {} UTC, next refresh at {} UTC; please do not open PRs\n",
            now.format(TIMESTAMP_FORMAT),
            next_refresh.format(TIMESTAMP_FORMAT)
        ));

        Some(RenderedReadme {
            content,
            blog_count: rows.len(),
            article_count: rows.iter().filter_map(|r| r.article_count).sum(),
        })
    }

    /// Sanitize one entry into a row, `None` when its title ends up empty
    pub fn row(&self, blog: &BlogEntry) -> Option<BlogRow> {
        let title = truncate_title(&sanitize(&blog.title), self.title_max_chars);
        if title.is_empty() {
            return None;
        }

        Some(BlogRow {
            favicon: favicon_cell(blog.favicon.as_deref().unwrap_or_default()),
            title,
            homepage: sanitize(&blog.homepage),
            article_count: blog.article_count,
            repo_full_name: blog.repo_full_name.clone(),
        })
    }
}

/// Cut to `max_chars` code points, then drop whitespace and hyphens left
/// dangling at the cut. A trailing backslash would escape the cell's
/// closing pipe, so it goes too, as does an entity split by the cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    let mut truncated: String = title.chars().take(max_chars).collect();
    if let Some(amp) = truncated.rfind('&') {
        if !truncated[amp..].contains(';') {
            truncated.truncate(amp);
        }
    }
    truncated
        .trim()
        .trim_end_matches(|c: char| c == '-' || c == '\\' || c.is_whitespace())
        .to_string()
}

fn favicon_cell(favicon: &str) -> String {
    let favicon = sanitize(favicon);
    if favicon.is_empty() || favicon.contains(PLACEHOLDER_FAVICON_MARKER) {
        return String::new();
    }

    format!(
        "<img src=\"{}\" width=\"24px\"/>",
        favicon.replace(FAVICON_PATH_ARTIFACT, "")
    )
}
