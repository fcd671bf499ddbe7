use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Set of absolute URLs already dispatched to the fetcher in one crawl
///
/// Clones share the same underlying set, so every branch of a crawl sees the
/// same visits. Membership test and insertion happen under one lock in
/// [`VisitedSet::claim`], which is what keeps two concurrent branches from
/// fetching the same URL.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as visited
    ///
    /// Returns true if the caller is the first to claim it and should fetch it.
    pub fn claim(&self, url: &str) -> bool {
        let mut visited = self.lock();
        if visited.contains(url) {
            return false;
        }
        visited.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns the visited URLs in sorted order
    pub fn snapshot(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.lock().iter().cloned().collect();
        urls.sort();
        urls
    }

    // A panic while holding the lock cannot leave a HashSet half-updated
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
