//! Transaction deadlines.
//!
//! A deadline is an absolute time in milliseconds since the network's
//! epoch adjustment (the unixtime of the first block). A transaction not
//! confirmed by its deadline is discarded by the network.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default confirmation window when the builder is given no override.
pub const DEFAULT_HORIZON: Duration = Duration::from_secs(2 * 60 * 60);

/// An absolute deadline relative to the network epoch, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(u64);

impl Deadline {
    /// Deadline at `now + horizon`, expressed on the network's clock.
    pub fn from_now(epoch_adjustment_secs: u64, horizon: Duration) -> Self {
        Deadline(network_now_ms(epoch_adjustment_secs) + horizon.as_millis() as u64)
    }

    /// Milliseconds since the network epoch.
    pub fn value_ms(self) -> u64 {
        self.0
    }

    /// Whether the deadline still lies strictly in the future of the
    /// network's current epoch-adjusted time. Checked at announce time.
    pub fn is_future(self, epoch_adjustment_secs: u64) -> bool {
        self.0 > network_now_ms(epoch_adjustment_secs)
    }
}

/// Current time on the network clock: unixtime minus the epoch adjustment.
pub fn network_now_ms(epoch_adjustment_secs: u64) -> u64 {
    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as u64;
    unix_ms.saturating_sub(epoch_adjustment_secs * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH: u64 = 1_615_853_185;

    #[test]
    fn test_deadline_is_strictly_future() {
        let deadline = Deadline::from_now(EPOCH, DEFAULT_HORIZON);
        assert!(deadline.is_future(EPOCH));
        assert!(deadline.value_ms() > network_now_ms(EPOCH));
    }

    #[test]
    fn test_horizon_is_respected() {
        let short = Deadline::from_now(EPOCH, Duration::from_secs(60));
        let long = Deadline::from_now(EPOCH, DEFAULT_HORIZON);
        assert!(short < long);
        // The two-hour default lands roughly two hours out.
        let delta = long.value_ms() - network_now_ms(EPOCH);
        assert!((delta as i64 - 2 * 3600 * 1000).abs() < 5000);
    }

    #[test]
    fn test_expired_deadline_detected() {
        let past = Deadline(network_now_ms(EPOCH).saturating_sub(1));
        assert!(!past.is_future(EPOCH));
    }
}
