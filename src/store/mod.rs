pub mod sqlite;

use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::domain::ConsentState;

pub use sqlite::SqliteStore;

pub const OPTION_GROUP: &str = "updateRss";
pub const CONSENT_OPTION: &str = "check";
pub const LAST_CHECK_OPTION: &str = "lastCheck";

/// Named option group as exposed to the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub id: &'static str,
    pub options: Vec<(&'static str, Option<String>)>,
}

pub trait Store: Send + Sync {
    /// Unset reads as [`ConsentState::Undecided`].
    fn consent(&self) -> Result<ConsentState>;
    fn set_consent(&self, state: ConsentState) -> Result<()>;

    fn last_check(&self) -> Result<Option<DateTime<Utc>>>;
    fn set_last_check(&self, at: DateTime<Utc>) -> Result<()>;

    fn option_group(&self) -> Result<OptionGroup> {
        Ok(OptionGroup {
            id: OPTION_GROUP,
            options: vec![
                (CONSENT_OPTION, Some(self.consent()?.to_string())),
                (LAST_CHECK_OPTION, self.last_check()?.map(|at| at.to_rfc3339())),
            ],
        })
    }
}
