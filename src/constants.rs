// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how the pipeline behaves by default: how long it
//! waits between retries, how long the cache takes to warm up, and where the
//! notification threshold sits.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Retrieval
// ---------------------------------------------------------------------------

/// Delays between retries of a transient web failure, in order.
///
/// Three retries after the first attempt, backing off from half a second
/// to ten seconds.
pub const DEFAULT_RETRY_DELAYS: [Duration; 3] = [
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(10),
];

/// Upper bound for a single HTTP request, connect through body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent with every fetch.
pub const USER_AGENT: &str = concat!("wordtally/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// How long the cache spends warming up on first use.
pub const DEFAULT_CACHE_WARM_UP: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Word counts at or above this go to the "more" notification.
pub const WORD_COUNT_THRESHOLD: usize = 1000;

pub const LESS_THAN_THRESHOLD_BODY: &str = "Less than 1000";

pub const MORE_THAN_THRESHOLD_BODY: &str = "More than 1000";

pub const DEFAULT_NOTIFY_TO: &str = "to@wordtally.local";

pub const DEFAULT_NOTIFY_FROM: &str = "no-reply@wordtally.local";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log file written under the system temp directory unless `--log-file` is given.
pub const DEFAULT_LOG_FILE_NAME: &str = "wordtally.log";
