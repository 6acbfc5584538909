use std::time::{Duration, Instant};

/// Fixed-interval gate that decouples simulation ticks from frames
#[derive(Debug, Clone)]
pub struct TickGate {
    interval: Duration,
    last_update: Instant,
}

impl TickGate {
    /// The first tick fires one full interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_update: now,
        }
    }

    /// True when at least one interval has passed since the last accepted
    /// tick; accepting restarts the interval from `now`
    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_update) >= self.interval {
            self.last_update = now;
            return true;
        }
        false
    }
}
