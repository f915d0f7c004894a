use chrono::{DateTime, Local, Utc};

use crate::domain::ConsentState;

/// What a single scheduler run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckAction {
    /// Make the proposal reachable from the channel without popping it up.
    /// `mark_first_run` also records the first-ever run.
    RegisterProposal { mark_first_run: bool },
    /// First run ever: only remember that we ran.
    MarkFirstRun,
    Idle,
    /// Actively show the proposal (spawned).
    ProposeSubscription,
    /// Fetch the feed and notify (spawned).
    CheckFeed,
}

impl CheckAction {
    pub fn needs_task(&self) -> bool {
        matches!(self, CheckAction::ProposeSubscription | CheckAction::CheckFeed)
    }
}

pub fn decide(
    consent: ConsentState,
    last_check: Option<DateTime<Utc>>,
    now: DateTime<Local>,
) -> CheckAction {
    if consent == ConsentState::Declined {
        return CheckAction::RegisterProposal {
            mark_first_run: last_check.is_none(),
        };
    }

    let Some(last_check) = last_check else {
        return CheckAction::MarkFirstRun;
    };

    match (checked_today(last_check, now), consent) {
        (true, ConsentState::Undecided) => CheckAction::RegisterProposal {
            mark_first_run: false,
        },
        (true, _) => CheckAction::Idle,
        (false, ConsentState::Undecided) => CheckAction::ProposeSubscription,
        (false, _) => CheckAction::CheckFeed,
    }
}

/// Zero whole days between the last check's calendar day and today's,
/// both taken in `now`'s time zone. A last check dated in the future is
/// not "today".
pub fn checked_today(last_check: DateTime<Utc>, now: DateTime<Local>) -> bool {
    let last_day = last_check.with_timezone(&now.timezone()).date_naive();
    now.date_naive().signed_duration_since(last_day).num_days() == 0
}
