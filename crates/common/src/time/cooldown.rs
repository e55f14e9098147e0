//! Countdown timers that block a form action until they elapse
//!
//! Built on the tokio clock so tests can pause and advance time.

use std::time::Duration;

use futures::stream::{self, Stream};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// A resettable countdown measured in whole seconds
#[derive(Debug, Clone, Default)]
pub struct Cooldown {
    deadline: Option<Instant>,
}

impl Cooldown {
    /// Create an idle cooldown
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Start (or restart) the countdown
    pub fn start(&mut self, secs: u64) {
        self.deadline = Some(Instant::now() + Duration::from_secs(secs));
        #[cfg(feature = "observability")]
        tracing::debug!(secs, "cooldown started");
    }

    /// Stop the countdown immediately
    pub fn clear(&mut self) {
        self.deadline = None;
    }

    /// Seconds left, rounded up; zero when idle
    pub fn remaining_secs(&self) -> u64 {
        self.deadline.map_or(0, |deadline| {
            let left = deadline.saturating_duration_since(Instant::now());
            left.as_secs() + u64::from(left.subsec_nanos() > 0)
        })
    }

    /// Whether the guarded action is still blocked
    pub fn is_active(&self) -> bool {
        self.remaining_secs() > 0
    }

    /// `"Try again in {n}s…"` while active
    pub fn label(&self) -> Option<String> {
        let remaining = self.remaining_secs();
        (remaining > 0).then(|| format!("Try again in {remaining}s…"))
    }

    /// Remaining seconds once per second, ending with `0`
    ///
    /// The stream is detached from `self`; restarting the cooldown does not
    /// affect a stream that is already running.
    pub fn ticks(&self) -> impl Stream<Item = u64> {
        let deadline = self.deadline;
        let mut interval = interval_at(Instant::now(), Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        stream::unfold((interval, deadline, false), |(mut interval, deadline, done)| async move {
            if done {
                return None;
            }
            interval.tick().await;
            let remaining = deadline.map_or(0, |d| {
                let left = d.saturating_duration_since(Instant::now());
                left.as_secs() + u64::from(left.subsec_nanos() > 0)
            });
            Some((remaining, (interval, deadline, remaining == 0)))
        })
    }
}
