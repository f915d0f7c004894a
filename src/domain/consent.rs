use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::TidingsError;

/// Whether the user agreed to automatic feed checks.
///
/// Persisted as one of the strings `YES`, `NO` or `UNDEFINED`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentState {
    Accepted,
    Declined,
    #[default]
    Undecided,
}

impl ConsentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentState::Accepted => "YES",
            ConsentState::Declined => "NO",
            ConsentState::Undecided => "UNDEFINED",
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentState {
    type Err = TidingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YES" => Ok(ConsentState::Accepted),
            "NO" => Ok(ConsentState::Declined),
            "UNDEFINED" => Ok(ConsentState::Undecided),
            other => Err(TidingsError::InvalidOption {
                option: "check".into(),
                value: other.to_string(),
            }),
        }
    }
}
