//! Time helpers.
//!
//! Two clocks are in play: wall-clock [`Timestamp`]s stamp events for
//! observers, while gesture timing uses monotonic [`Instant`]s so that
//! classification never depends on the system clock being adjusted.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// UTC timestamp attached to events.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Time elapsed between two monotonic instants, zero if `later` is earlier.
#[must_use]
pub fn elapsed_between(earlier: Instant, later: Instant) -> Duration {
    later.saturating_duration_since(earlier)
}
