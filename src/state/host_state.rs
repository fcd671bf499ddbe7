use std::time::{Duration, Instant};

/// Tracks the state of one host during crawling
///
/// This structure maintains the per-host information needed to space
/// requests to the same host apart.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Number of requests made to this host in the current crawl
    pub request_count: u32,

    /// Timestamp of the last request to this host
    pub last_request_time: Option<Instant>,
}

impl HostState {
    /// Creates a new HostState with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a request can be made to this host now
    pub fn can_request(&self, min_interval: Duration, now: Instant) -> bool {
        self.time_until_next_request(min_interval, now).is_none()
    }

    /// Records that a request was made to this host
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, min_interval: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < min_interval {
            Some(min_interval - elapsed)
        } else {
            None
        }
    }
}
