//! Connection liveness bookkeeping.
//!
//! Every inbound frame — pings included — stamps the last-received time.
//! The runtime polls [`ConnectionHealth::idle_for`] on an interval and
//! surfaces a non-fatal warning with a manual reconnect offer once the
//! channel has been silent past the threshold. Built on `tokio::time`
//! instants so paused-time tests can drive the clock.

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;

use tokio::time::{Duration, Instant};

/// Inbound silence tolerated before the idle warning shows.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(6000);

/// Last-received timestamp plus the idle threshold it is judged against.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionHealth {
    last_received: Instant,
    threshold: Duration,
}

impl ConnectionHealth {
    /// Start the clock now; connecting counts as having heard from the
    /// server.
    #[must_use]
    pub fn new(threshold: Duration) -> Self {
        Self { last_received: Instant::now(), threshold }
    }

    /// Note an inbound frame.
    pub fn record_frame(&mut self) {
        self.last_received = Instant::now();
    }

    /// How long past every expectation the channel has been silent, or
    /// `None` while it is healthy.
    #[must_use]
    pub fn idle_for(&self) -> Option<Duration> {
        let silent = self.last_received.elapsed();
        (silent > self.threshold).then_some(silent)
    }
}

impl Default for ConnectionHealth {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}
