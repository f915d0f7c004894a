use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::FeedItem;

pub const PROPOSAL_ID: &str = "tidings.subscription-proposal";
pub const ACCEPT_LINK: &str = "tidings://yes";
pub const DECLINE_LINK: &str = "tidings://no";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationChannel {
    Rss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// The opt-in prompt for automatic checks
    Proposal,
    FeedItem { link: Option<String> },
}

/// What the sink displays. Carries no behaviour; activated links are
/// routed back through [`ProposalAction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
}

impl NotificationItem {
    pub fn subscription_proposal(learn_more_url: &str) -> Self {
        Self {
            id: PROPOSAL_ID.to_string(),
            title: String::new(),
            body: format!(
                "Would you like to receive announcements and update notices? \
                 <a href=\"{ACCEPT_LINK}\">Yes</a> | <a href=\"{DECLINE_LINK}\">No</a> | \
                 <a href=\"{learn_more_url}\">Learn more</a>"
            ),
            kind: NotificationKind::Proposal,
        }
    }

    pub fn is_proposal(&self) -> bool {
        self.kind == NotificationKind::Proposal
    }
}

impl From<&FeedItem> for NotificationItem {
    fn from(item: &FeedItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            body: item.body.clone(),
            kind: NotificationKind::FeedItem {
                link: item.link.clone(),
            },
        }
    }
}

/// Semantic target of a link activated inside the proposal notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalAction {
    Accept,
    Decline,
    Other(String),
}

impl ProposalAction {
    pub fn from_link(href: &str) -> Self {
        match Url::parse(href).ok().as_ref().and_then(Url::host_str) {
            Some("yes") => ProposalAction::Accept,
            Some("no") => ProposalAction::Decline,
            _ => ProposalAction::Other(href.to_string()),
        }
    }
}
