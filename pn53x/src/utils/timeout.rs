//! Timeouts as understood by the driver.
//!
//! The driver encodes "block forever" as `0` and "use the driver default" as
//! `-1`; anything positive is milliseconds.

use std::time::Duration;

/// How long a blocking driver call may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeout {
    /// Block until the exchange completes or is aborted.
    Infinite,
    /// Let the driver pick.
    #[default]
    Default,
    /// Wait at most this many milliseconds.
    Millis(u32),
}

impl Timeout {
    /// Raw value passed to the driver.
    pub fn as_raw(self) -> i32 {
        match self {
            Timeout::Infinite => 0,
            Timeout::Default => -1,
            Timeout::Millis(0) => 0,
            Timeout::Millis(ms) => ms.min(i32::MAX as u32) as i32,
        }
    }

    /// Inverse of [`Timeout::as_raw`]; any negative value means default.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Timeout::Infinite,
            r if r < 0 => Timeout::Default,
            r => Timeout::Millis(r as u32),
        }
    }

    /// Wall-clock bound, `None` for infinite. `fallback` stands in for the
    /// driver default.
    pub fn duration(self, fallback: Duration) -> Option<Duration> {
        match self {
            Timeout::Infinite | Timeout::Millis(0) => None,
            Timeout::Default => Some(fallback),
            Timeout::Millis(ms) => Some(Duration::from_millis(u64::from(ms))),
        }
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        let ms = d.as_millis().min(i32::MAX as u128) as u32;
        if ms == 0 {
            Timeout::Infinite
        } else {
            Timeout::Millis(ms)
        }
    }
}
