use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{NotificationChannel, NotificationItem, NotificationKind};
use crate::notify::NotificationSink;

/// Sink used by the command-line host: prints to stdout.
#[derive(Default)]
pub struct ConsoleSink {
    defaults: Mutex<HashMap<NotificationChannel, NotificationItem>>,
    shown: Mutex<Vec<NotificationItem>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_notification(&self, channel: NotificationChannel) -> Option<NotificationItem> {
        self.defaults
            .lock()
            .ok()
            .and_then(|defaults| defaults.get(&channel).cloned())
    }

    /// Notifications shown and not yet hidden.
    pub fn shown(&self) -> Vec<NotificationItem> {
        self.shown
            .lock()
            .map(|shown| shown.clone())
            .unwrap_or_default()
    }

    fn render(item: &NotificationItem) -> String {
        match &item.kind {
            NotificationKind::Proposal => item.body.clone(),
            NotificationKind::FeedItem { link: Some(link) } => {
                format!("{}\n  {}\n  {}", item.title, item.body, link)
            }
            NotificationKind::FeedItem { link: None } => format!("{}\n  {}", item.title, item.body),
        }
    }
}

impl NotificationSink for ConsoleSink {
    fn add_notification(&self, channel: NotificationChannel, item: NotificationItem) {
        println!("[{:?}] {}", channel, Self::render(&item));
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(item);
        }
    }

    fn set_default_notification(&self, channel: NotificationChannel, item: NotificationItem) {
        tracing::debug!("Default notification for {:?} set to {}", channel, item.id);
        if let Ok(mut defaults) = self.defaults.lock() {
            defaults.insert(channel, item);
        }
    }

    fn hide_notification(&self) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.pop();
        }
    }
}
