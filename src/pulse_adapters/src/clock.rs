use chrono::{DateTime, Utc};

use pulse_core::Clock;

/// Wall-clock time. The only `Clock` used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
