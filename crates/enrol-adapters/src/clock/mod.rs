//! Clock adapters.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use enrol_core::application::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for testing. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    inner: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut inner) = self.inner.write() {
            *inner = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut inner) = self.inner.write() {
            let next = chrono::Duration::from_std(by)
                .ok()
                .and_then(|delta| inner.checked_add_signed(delta));
            if let Some(next) = next {
                *inner = next;
            }
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner
            .read()
            .map(|now| *now)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        clock.advance(Duration::from_secs(86_400));
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn system_clock_is_recent() {
        let before = Utc::now();
        assert!(SystemClock::new().now() >= before);
    }
}
