use chrono::Utc;

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedClock {
    now: i64,
}

impl FixedClock {
    #[must_use]
    pub fn at(now_millis: i64) -> Self {
        Self { now: now_millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now
    }
}
