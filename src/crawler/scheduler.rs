//! Scheduler for fetch admission and rate limiting
//!
//! This module handles:
//! - Global concurrency limiting via semaphores
//! - Per-host minimum spacing between requests
//! - Per-host request counting

use crate::state::HostState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Permission to perform one fetch
///
/// Dropping it releases the global concurrency slot.
#[derive(Debug)]
pub struct FetchSlot {
    pub host: String,
    _permit: OwnedSemaphorePermit,
}

/// Scheduler gates every fetch of a crawl
///
/// The scheduler coordinates:
/// - Global concurrency limits (max concurrent fetches)
/// - Per-host rate limits (minimum time between requests)
#[derive(Debug)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    global_semaphore: Arc<Semaphore>,

    /// Per-host state tracking
    host_states: Mutex<HashMap<String, HostState>>,

    min_host_interval: Duration,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Maximum fetches in flight at once (at least 1)
    /// * `min_host_interval` - Minimum time between two requests to one host
    pub fn new(max_concurrent: usize, min_host_interval: Duration) -> Self {
        Self {
            global_semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            host_states: Mutex::new(HashMap::new()),
            min_host_interval,
        }
    }

    /// Waits until a fetch to `host` may start
    ///
    /// This method:
    /// 1. Acquires a global semaphore permit
    /// 2. Waits until the host's minimum interval has elapsed
    /// 3. Records the request against the host
    ///
    /// Returns None only if the semaphore was closed.
    pub async fn acquire(&self, host: &str) -> Option<FetchSlot> {
        let permit = self.global_semaphore.clone().acquire_owned().await.ok()?;

        loop {
            let wait = {
                let now = Instant::now();
                let mut states = self.lock_states();
                let state = states.entry(host.to_string()).or_default();

                if state.can_request(self.min_host_interval, now) {
                    state.record_request(now);
                    break;
                }
                state
                    .time_until_next_request(self.min_host_interval, now)
                    .unwrap_or_default()
            };

            tracing::trace!("Host {} not ready, waiting {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }

        Some(FetchSlot {
            host: host.to_string(),
            _permit: permit,
        })
    }

    /// Number of fetch slots currently free
    pub fn available_slots(&self) -> usize {
        self.global_semaphore.available_permits()
    }

    /// Requests recorded against a host so far
    pub fn request_count(&self, host: &str) -> u32 {
        self.lock_states()
            .get(host)
            .map(|state| state.request_count)
            .unwrap_or(0)
    }

    /// Number of distinct hosts contacted
    pub fn host_count(&self) -> usize {
        self.lock_states().len()
    }

    fn lock_states(&self) -> MutexGuard<'_, HashMap<String, HostState>> {
        self.host_states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
