use super::BlogEntry;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Process-wide store of registered blogs.
///
/// Built once at startup and shared by the upload path and the aggregator.
/// Entries are never removed and are lost on restart.
#[derive(Debug, Default)]
pub struct BlogRegistry {
    blogs: RwLock<HashMap<String, BlogEntry>>,
}

impl BlogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale replace the entry for `entry.repo_full_name`
    pub fn upsert(&self, entry: BlogEntry) {
        tracing::debug!(repo = %entry.repo_full_name, "Registering blog");
        self.blogs.write().insert(entry.repo_full_name.clone(), entry);
    }

    /// Point-in-time copy, most recently updated first
    pub fn snapshot_all(&self) -> Vec<BlogEntry> {
        let mut blogs: Vec<BlogEntry> = self.blogs.read().values().cloned().collect();
        blogs.sort_by(compare_recent_first);
        blogs
    }

    pub fn len(&self) -> usize {
        self.blogs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blogs.read().is_empty()
    }
}

// Entries without a timestamp go last; the repo name keeps ties stable.
fn compare_recent_first(a: &BlogEntry, b: &BlogEntry) -> Ordering {
    match (a.last_update, b.last_update) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.repo_full_name.cmp(&b.repo_full_name))
}
