//! Millisecond durations for deadlines and configuration.
//!
//! [`DurationMs`] serializes as a plain integer of milliseconds, so
//! configuration files read `"reply_timeout": 8000` rather than serde's
//! `{"secs": 8, "nanos": 0}` form. Sub-millisecond precision is dropped and
//! durations too long for a `u64` of milliseconds saturate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A deadline or grace period, in whole milliseconds.
///
/// # Examples
///
/// ```
/// use parley_protocol::DurationMs;
/// use std::time::Duration;
///
/// let d = DurationMs::from(Duration::from_micros(2_000_900));
/// assert_eq!(d, DurationMs::from_secs(2));
/// assert_eq!(d.to_string(), "2000ms");
/// assert!(DurationMs::default().is_zero());
/// ```
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DurationMs(u64);

impl DurationMs {
    /// No time at all.
    pub const ZERO: Self = Self(0);

    /// `ms` milliseconds.
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// `secs` seconds, saturating.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Whole milliseconds.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Whether no time is allowed at all. A zero grace period means
    /// "do not wait".
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The same span as a [`Duration`].
    pub const fn to_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl From<Duration> for DurationMs {
    fn from(d: Duration) -> Self {
        Self(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl From<DurationMs> for Duration {
    fn from(d: DurationMs) -> Self {
        d.to_std()
    }
}

impl fmt::Display for DurationMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
