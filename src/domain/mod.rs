pub mod consent;
pub mod item;
pub mod notification;

pub use consent::ConsentState;
pub use item::FeedItem;
pub use notification::{NotificationChannel, NotificationItem, NotificationKind, ProposalAction};
