//! Placeholder substitution for the README Solo sends along with a backup.
//!
//! Only the exact tokens below are replaced, any other `$` sequence in the
//! user's text is left alone.

use regex::Regex;
use std::sync::LazyLock;

pub const REPO_FULL_NAME_PLACEHOLDER: &str = "${repoFullName}";
pub const TOC_PLACEHOLDER: &str = "${toc}";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,6})\s+(.+?)\s*#*\s*$").expect("valid heading pattern"));

pub fn render_readme(template: &str, repo_full_name: &str) -> String {
    let readme = template.replace(REPO_FULL_NAME_PLACEHOLDER, repo_full_name);
    if !readme.contains(TOC_PLACEHOLDER) {
        return readme;
    }

    let toc = table_of_contents(&readme);
    readme.replace(TOC_PLACEHOLDER, &toc)
}

/// Nested bullet list linking every level 2-6 heading outside code fences
pub fn table_of_contents(markdown: &str) -> String {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len();
            let text = caps[2].trim();
            if text == TOC_PLACEHOLDER {
                continue;
            }
            lines.push(format!(
                "{}* [{}](#{})",
                "  ".repeat(level - 2),
                text,
                anchor(text)
            ));
        }
    }

    lines.join("\n")
}

/// GitHub-style heading anchor
fn anchor(heading: &str) -> String {
    heading
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c.to_lowercase().collect::<String>())
            } else if c == ' ' {
                Some("-".to_string())
            } else {
                None
            }
        })
        .collect()
}
