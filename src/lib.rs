//! # Tidings
//!
//! A background announcement-feed checker for desktop and command-line
//! applications. Once per session it decides, from a persisted consent
//! option and the last-check instant, whether to stay quiet, propose
//! subscribing, or fetch the feed and surface the new entries.
//!
//! ## Architecture
//!
//! ```text
//! Store → Scheduler → Fetcher → Normalizer → NotificationSink
//!            ↑                                      │
//!            └────────── consent answers ───────────┘
//! ```
//!
//! - [`store`]: consent and last-check options, SQLite backed
//! - [`scheduler`]: the decision table and the spawned check task
//! - [`fetcher`]: single-hop HTTP GET plus the manual redirect loop
//! - [`normalizer`]: feed parsing with cutoff filtering
//! - [`notify`]: the sink the scheduler pushes into
//!
//! ## Quick Start
//!
//! ```bash
//! # Once per application start
//! tidings run
//!
//! # Answer the subscription proposal
//! tidings respond tidings://yes
//!
//! # Inspect the stored options
//! tidings status
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together store,
/// fetcher, normalizer, sink and scheduler.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/tidings/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ConsentState`](domain::ConsentState): the three-valued opt-in flag
/// - [`FeedItem`](domain::FeedItem): a parsed feed entry
/// - [`NotificationItem`](domain::NotificationItem): what the sink displays
/// - [`ProposalAction`](domain::ProposalAction): an answer to the proposal
pub mod domain;

/// HTTP fetching with manual redirect handling.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for one GET
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`fetch_following_redirects`](fetcher::fetch_following_redirects): the bounded loop
pub mod fetcher;

/// Feed parsing and cutoff filtering.
pub mod normalizer;

/// Notification sink and link handling.
pub mod notify;

/// The once-per-session check scheduler.
pub mod scheduler;

/// Option persistence.
///
/// - [`Store`](store::Store): Trait over the `updateRss` option group
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
