use std::sync::Mutex;

use tidings::domain::{NotificationChannel, NotificationItem};
use tidings::notify::NotificationSink;

#[derive(Default)]
pub struct RecordingSink {
    pub added: Mutex<Vec<NotificationItem>>,
    pub defaults: Mutex<Vec<NotificationItem>>,
    pub hidden: Mutex<usize>,
}

impl RecordingSink {
    pub fn added(&self) -> Vec<NotificationItem> {
        self.added.lock().unwrap().clone()
    }

    pub fn defaults(&self) -> Vec<NotificationItem> {
        self.defaults.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn add_notification(&self, _: NotificationChannel, item: NotificationItem) {
        self.added.lock().unwrap().push(item);
    }

    fn set_default_notification(&self, _: NotificationChannel, item: NotificationItem) {
        self.defaults.lock().unwrap().push(item);
    }

    fn hide_notification(&self) {
        *self.hidden.lock().unwrap() += 1;
    }
}

pub const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Announcements</title>
    <link>https://example.com</link>
    <description>Project news</description>
    <item>
      <title>Release 3.0</title>
      <guid>r3</guid>
      <pubDate>Wed, 13 Mar 2024 09:00:00 GMT</pubDate>
      <description>Third</description>
    </item>
    <item>
      <title>Survey</title>
      <guid>survey</guid>
      <pubDate>Wed, 13 Mar 2024 02:00:00 GMT</pubDate>
      <description>Tell us</description>
    </item>
    <item>
      <title>Meetup</title>
      <guid>meetup</guid>
      <pubDate>Wed, 13 Mar 2024 01:00:00 GMT</pubDate>
      <description>See you</description>
    </item>
    <item>
      <title>Release 2.9</title>
      <guid>r29</guid>
      <pubDate>Fri, 01 Mar 2024 09:00:00 GMT</pubDate>
      <description>Old news</description>
    </item>
  </channel>
</rss>"#;
