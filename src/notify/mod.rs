pub mod console;

use crate::app::Result;
use crate::domain::{NotificationChannel, NotificationItem};

pub use console::ConsoleSink;

/// Where notifications go. The scheduler only ever pushes.
pub trait NotificationSink: Send + Sync {
    /// Show `item` to the user.
    fn add_notification(&self, channel: NotificationChannel, item: NotificationItem);

    /// Keep `item` reachable from the channel without popping it up.
    fn set_default_notification(&self, channel: NotificationChannel, item: NotificationItem);

    fn hide_notification(&self);
}

/// Fallback for links that are not consent answers.
pub trait LinkHandler: Send + Sync {
    fn open_link(&self, url: &str) -> Result<()>;
}

pub struct BrowserLinkHandler;

impl LinkHandler for BrowserLinkHandler {
    fn open_link(&self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }
}
