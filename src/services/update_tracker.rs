use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::models::{UpdateReport, UpdateStatus};

/// Tracks ingest runs: whether one is in progress and what the last one found
///
/// Held in the application state rather than in globals so every instance
/// (and every test) gets its own.
#[derive(Debug, Default)]
pub struct UpdateTracker {
    in_progress: AtomicBool,
    last: RwLock<Option<UpdateReport>>,
}

/// Marks an ingest run as in progress until dropped
#[derive(Debug)]
pub struct UpdateGuard<'a> {
    tracker: &'a UpdateTracker,
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.tracker.in_progress.store(false, Ordering::Release);
    }
}

impl UpdateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run, or `None` if one is already in progress
    pub fn try_begin(&self) -> Option<UpdateGuard<'_>> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| UpdateGuard { tracker: self })
    }

    pub fn is_updating(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Record the outcome of a finished run
    pub async fn record(&self, report: UpdateReport) {
        *self.last.write().await = Some(report);
    }

    pub async fn status(&self) -> UpdateStatus {
        let last = self.last.read().await.clone();
        UpdateStatus {
            is_updating: self.is_updating(),
            last_update: last.as_ref().map(|report| report.timestamp),
            last_results: last,
        }
    }
}
