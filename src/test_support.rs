//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that starts at a fixed instant and advances one second per reading,
/// so consecutive creations get strictly increasing timestamps.
#[derive(Debug)]
pub(crate) struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub(crate) fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
                .single()
                .expect("fixed start instant is unambiguous"),
            ticks: AtomicI64::new(0),
        }
    }

    pub(crate) const fn start(&self) -> DateTime<Utc> {
        self.start
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(tick)
    }
}
