//! Time abstraction for deterministic request signing.
//!
//! Every API call reads the clock exactly once; the value is both signed and
//! sent in the `X-App-Access-Ts` header. The [`Clock`] trait lets tests (and
//! callers replaying requests) pin that value.

use std::time::{Duration, SystemTime};

/// Abstraction over system time.
///
/// # Example
///
/// ```
/// use sumsub_client::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a single instant.
///
/// ```
/// use sumsub_client::time::{Clock, FixedClock, unix_seconds};
///
/// let clock = FixedClock::from_unix(1_712_760_187);
/// assert_eq!(unix_seconds(clock.now()), 1_712_760_187);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(SystemTime);

impl FixedClock {
    /// Creates a clock that always returns `at`.
    #[must_use]
    pub const fn new(at: SystemTime) -> Self {
        Self(at)
    }

    /// Creates a clock at the given number of seconds since the Unix epoch.
    #[must_use]
    pub fn from_unix(secs: u64) -> Self {
        Self(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

/// Whole seconds between the Unix epoch and `time`.
///
/// Instants before the epoch yield negative values; sub-second precision is
/// truncated toward the epoch.
#[must_use]
#[allow(clippy::cast_possible_wrap)] // u64 seconds beyond i64::MAX are not reachable
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}
