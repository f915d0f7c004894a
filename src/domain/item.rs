use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One entry of the announcement feed, already filtered against the cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl FeedItem {
    pub fn new(feed_url: &str, entry_id: &str, title: Option<String>, body: Option<String>) -> Self {
        Self {
            id: Self::generate_id(feed_url, entry_id),
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "(Untitled)".to_string()),
            body: body.unwrap_or_default(),
            link: None,
            published_at: None,
        }
    }

    /// Generate a deterministic ID from feed URL and entry ID
    pub fn generate_id(feed_url: &str, entry_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(feed_url.as_bytes());
        hasher.update(entry_id.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// True when the item is strictly newer than `cutoff`.
    ///
    /// Undated items only pass when there is no cutoff at all.
    pub fn is_newer_than(&self, cutoff: Option<DateTime<Utc>>) -> bool {
        match (cutoff, self.published_at) {
            (None, _) => true,
            (Some(cutoff), Some(published)) => published > cutoff,
            (Some(_), None) => false,
        }
    }
}
