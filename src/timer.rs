use std::time::{Duration, Instant};

/// Countdown for one attempt. Owned by the playing state, so leaving that
/// state drops it and nothing can tick a finished attempt.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    started: Instant,
    limit: Duration,
}

impl Countdown {
    pub fn start(now: Instant, limit: Duration) -> Self {
        Countdown {
            started: now,
            limit,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.limit.saturating_sub(self.elapsed(now))
    }

    /// Remaining time rounded up to whole seconds, as shown on the HUD.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let rem = self.remaining(now);
        rem.as_secs() + u64::from(rem.subsec_nanos() > 0)
    }

    pub fn expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}
