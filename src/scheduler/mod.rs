//! Once-per-session feed check.
//!
//! [`CheckScheduler::run`] reads the consent and last-check options on the
//! caller's thread, decides what to do (see [`decide`]) and pushes anything
//! that needs the network onto the tokio runtime, returning at once.

pub mod clock;
pub mod decision;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::app::Result;
use crate::config::FeedConfig;
use crate::domain::{ConsentState, NotificationChannel, NotificationItem, ProposalAction};
use crate::fetcher::{fetch_following_redirects, Fetcher};
use crate::normalizer::FeedParser;
use crate::notify::{BrowserLinkHandler, LinkHandler, NotificationSink};
use crate::store::{OptionGroup, Store};

pub use clock::{Clock, FixedClock, SystemClock};
pub use decision::{checked_today, decide, CheckAction};

#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub feed_url: String,
    pub max_redirects: usize,
    pub learn_more_url: String,
}

impl From<&FeedConfig> for CheckSettings {
    fn from(config: &FeedConfig) -> Self {
        Self {
            feed_url: config.url.clone(),
            max_redirects: config.max_redirects,
            learn_more_url: config.learn_more_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CheckScheduler {
    settings: CheckSettings,
    store: Arc<dyn Store>,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: Arc<dyn FeedParser>,
    sink: Arc<dyn NotificationSink>,
    links: Arc<dyn LinkHandler>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
    in_flight: Arc<AtomicBool>,
}

/// Held by a running feed check; frees the slot when dropped.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckScheduler {
    pub fn new(
        settings: CheckSettings,
        store: Arc<dyn Store>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        parser: Arc<dyn FeedParser>,
        sink: Arc<dyn NotificationSink>,
        runtime: Handle,
    ) -> Self {
        Self {
            settings,
            store,
            fetcher,
            parser,
            sink,
            links: Arc::new(BrowserLinkHandler),
            clock: Arc::new(SystemClock),
            runtime,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_link_handler(mut self, links: Arc<dyn LinkHandler>) -> Self {
        self.links = links;
        self
    }

    pub fn options(&self) -> Result<OptionGroup> {
        self.store.option_group()
    }

    /// Decide and act. Returns the handle of the spawned task, if any; it
    /// may be dropped without affecting the task.
    pub fn run(&self) -> Option<JoinHandle<()>> {
        let state = self
            .store
            .consent()
            .and_then(|consent| Ok((consent, self.store.last_check()?)));
        let (consent, last_check) = match state {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Cannot read feed check options: {}", e);
                return None;
            }
        };

        let action = decide(consent, last_check, self.clock.now());
        tracing::debug!("Consent {}, last check {:?}: {:?}", consent, last_check, action);

        match action {
            CheckAction::RegisterProposal { mark_first_run } => {
                self.register_proposal();
                if mark_first_run {
                    self.mark_first_run();
                }
                None
            }
            CheckAction::MarkFirstRun => {
                self.mark_first_run();
                None
            }
            CheckAction::Idle => None,
            CheckAction::ProposeSubscription => Some(self.spawn_proposal()),
            CheckAction::CheckFeed => self.spawn_check(),
        }
    }

    /// React to a link activated in the proposal. The notification is
    /// hidden whatever the outcome.
    pub fn apply(&self, action: ProposalAction) -> Result<Option<JoinHandle<()>>> {
        let outcome = match action {
            ProposalAction::Accept => {
                tracing::info!("Automatic feed checks accepted");
                self.store
                    .set_consent(ConsentState::Accepted)
                    .map(|()| self.spawn_check())
            }
            ProposalAction::Decline => {
                tracing::info!("Automatic feed checks declined");
                self.store.set_consent(ConsentState::Declined).map(|()| None)
            }
            ProposalAction::Other(url) => {
                if let Err(e) = self.links.open_link(&url) {
                    tracing::warn!("Failed to open {}: {}", url, e);
                }
                Ok(None)
            }
        };

        self.sink.hide_notification();
        outcome
    }

    pub fn handle_proposal_link(&self, href: &str) -> Result<Option<JoinHandle<()>>> {
        self.apply(ProposalAction::from_link(href))
    }

    fn proposal(&self) -> NotificationItem {
        NotificationItem::subscription_proposal(&self.settings.learn_more_url)
    }

    fn register_proposal(&self) {
        self.sink
            .set_default_notification(NotificationChannel::Rss, self.proposal());
    }

    fn mark_first_run(&self) {
        if let Err(e) = self.mark_last_check() {
            tracing::error!("Cannot record first feed check run: {}", e);
        }
    }

    fn mark_last_check(&self) -> Result<()> {
        let now: DateTime<Utc> = self.clock.now().with_timezone(&Utc);
        self.store.set_last_check(now)
    }

    fn spawn_proposal(&self) -> JoinHandle<()> {
        let sink = self.sink.clone();
        let proposal = self.proposal();
        self.runtime.spawn(async move {
            sink.add_notification(NotificationChannel::Rss, proposal);
        })
    }

    fn spawn_check(&self) -> Option<JoinHandle<()>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Feed check already running, not starting another");
            return None;
        }
        let guard = InFlight(self.in_flight.clone());

        let scheduler = self.clone();
        Some(self.runtime.spawn(async move {
            let _guard = guard;
            let url = &scheduler.settings.feed_url;
            match scheduler.check_feed().await {
                Ok(count) => tracing::info!("Checked {}: {} new items", url, count),
                Err(e) => tracing::warn!("Feed check of {} failed: {}", url, e),
            }
        }))
    }

    /// Fetch, parse, notify, then move the last-check mark. Nothing is
    /// marked when any step fails.
    async fn check_feed(&self) -> Result<usize> {
        let body = fetch_following_redirects(
            self.fetcher.as_ref(),
            &self.settings.feed_url,
            self.settings.max_redirects,
        )
        .await?;

        let cutoff = self.store.last_check()?;
        let items = self.parser.parse(&body, cutoff)?;

        for item in &items {
            self.sink
                .add_notification(NotificationChannel::Rss, NotificationItem::from(item));
        }

        self.mark_last_check()?;
        Ok(items.len())
    }
}
