use chrono::{DateTime, Utc};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, TidingsError};
use crate::domain::FeedItem;

/// Turns a fetched payload into the items newer than `cutoff`, in feed order.
pub trait FeedParser: Send + Sync {
    fn parse(&self, body: &[u8], cutoff: Option<DateTime<Utc>>) -> Result<Vec<FeedItem>>;
}

/// feed-rs backed parser for RSS, Atom and JSON Feed payloads.
#[derive(Clone)]
pub struct Normalizer {
    feed_url: String,
}

impl Normalizer {
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
        }
    }
}

impl FeedParser for Normalizer {
    fn parse(&self, body: &[u8], cutoff: Option<DateTime<Utc>>) -> Result<Vec<FeedItem>> {
        let feed = parser::parse(body).map_err(|e| TidingsError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let link = entry.links.first().map(|l| l.href.clone());
                let entry_id = if entry.id.is_empty() {
                    link.clone().unwrap_or_default()
                } else {
                    entry.id
                };

                let title = entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string());
                let body = entry
                    .content
                    .and_then(|c| c.body)
                    .or(entry.summary.map(|s| s.content))
                    .map(|b| decode_html_entities(&b).to_string());

                let mut item = FeedItem::new(&self.feed_url, &entry_id, title, body);
                item.link = link;
                item.published_at = entry.published.or(entry.updated);
                item
            })
            .filter(|item| item.is_newer_than(cutoff))
            .collect();

        Ok(items)
    }
}
