//! Crawl state tracker
//!
//! Tracks the lifecycle of every discovered URL:
//!
//! ```text
//! Unknown -> Pending -> InProcess -> Visited (terminal)
//! ```
//!
//! No transition skips backward; once a URL reaches Visited it never
//! re-enters Pending or InProcess. All operations take `&self` and are
//! atomic, so a single `CrawlState` can be shared by concurrent workers
//! without any external locking.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// Shared crawl state: the pending/in-process/visited URL partition
///
/// `pending` is a FIFO queue, so URLs are visited in breadth-first
/// discovery order. A companion hash set mirrors the queue contents for
/// O(1) duplicate checks in [`CrawlState::discover`].
#[derive(Debug, Default)]
pub struct CrawlState {
    inner: Mutex<Sets>,
}

#[derive(Debug, Default)]
struct Sets {
    pending: VecDeque<String>,
    pending_set: HashSet<String>,
    in_process: HashSet<String>,
    visited: HashSet<String>,
}

impl CrawlState {
    /// Creates an empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly discovered URL
    ///
    /// The URL enters `pending` only if it is not already pending, not
    /// currently being processed, and not visited. Calling this any number
    /// of times with the same URL yields at most one pending entry.
    pub fn discover(&self, url: &str) {
        let mut sets = self.inner.lock().unwrap();
        if sets.visited.contains(url)
            || sets.in_process.contains(url)
            || sets.pending_set.contains(url)
        {
            return;
        }
        sets.pending.push_back(url.to_string());
        sets.pending_set.insert(url.to_string());
    }

    /// Removes and returns the oldest pending URL (FIFO)
    ///
    /// Returns `None` when the pending queue is empty.
    pub fn take_next(&self) -> Option<String> {
        let mut sets = self.inner.lock().unwrap();
        let url = sets.pending.pop_front()?;
        sets.pending_set.remove(&url);
        Some(url)
    }

    /// Atomically claims a URL for processing
    ///
    /// Checks that the URL is neither visited nor already in process; if
    /// clear, inserts it into `in_process` and returns true. Returns false
    /// when the caller must skip the URL because another worker holds it or
    /// it has already been visited. The check and the insert happen under
    /// one lock acquisition, so no two callers can both succeed.
    pub fn claim(&self, url: &str) -> bool {
        let mut sets = self.inner.lock().unwrap();
        if sets.visited.contains(url) || sets.in_process.contains(url) {
            return false;
        }
        sets.in_process.insert(url.to_string());
        true
    }

    /// Marks a claimed URL as visited (terminal)
    ///
    /// Called after the fetch attempt finished, successfully or with a
    /// handled failure. The URL leaves `in_process` and will never be
    /// fetched again.
    pub fn complete(&self, url: &str) {
        let mut sets = self.inner.lock().unwrap();
        sets.in_process.remove(url);
        sets.visited.insert(url.to_string());
    }

    /// Returns a claimed URL to the pending queue without visiting it
    ///
    /// Used on cancellation so claimed-but-unfetched work is not silently
    /// dropped and a later run can resume it. No-op if the URL was not in
    /// process.
    pub fn release(&self, url: &str) {
        let mut sets = self.inner.lock().unwrap();
        if sets.in_process.remove(url) && !sets.pending_set.contains(url) {
            sets.pending.push_back(url.to_string());
            sets.pending_set.insert(url.to_string());
        }
    }

    /// Returns the number of URLs waiting to be fetched
    pub fn pending_len(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Returns the number of URLs currently being processed
    pub fn in_process_len(&self) -> usize {
        self.inner.lock().unwrap().in_process.len()
    }

    /// Returns the number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.inner.lock().unwrap().visited.len()
    }

    /// Returns true if the given URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.inner.lock().unwrap().visited.contains(url)
    }

    /// Returns true if there is no pending or in-process work
    pub fn is_idle(&self) -> bool {
        let sets = self.inner.lock().unwrap();
        sets.pending.is_empty() && sets.in_process.is_empty()
    }
}
