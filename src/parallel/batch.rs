use crate::error::{Result, SearchError};
use std::num::NonZeroUsize;

/// Batch size used when the hardware parallelism cannot be detected
pub const FALLBACK_PARALLELISM: usize = 4;

/// Calculate how many threads may run at once
///
/// Starts from the detected hardware parallelism (or [`FALLBACK_PARALLELISM`]
/// when the platform cannot report it) and applies the configured cap
/// (`0` = no cap). Always at least 1.
pub fn detect_batch_size(max_threads_config: usize) -> usize {
    let detected = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_PARALLELISM);

    let workers = if max_threads_config > 0 {
        std::cmp::min(max_threads_config, detected)
    } else {
        detected
    };
    workers.max(1)
}

/// Totals from a batched execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Batches actually started
    pub batches: usize,
    /// Items handed to a thread
    pub items_started: usize,
    /// True when the stop check ended execution before all items ran
    pub stopped_early: bool,
}

/// Runs work items one thread each, at most `batch_size` threads at a time
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    batch_size: usize,
}

impl BatchExecutor {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Execute `work` for every item in consecutive batches
    ///
    /// `work` receives the item and its slot within the batch. `should_stop`
    /// is checked after each batch has been fully joined; when it returns
    /// true no further batches are started.
    pub fn execute<T, F, S>(&self, items: &[T], work: F, should_stop: S) -> Result<BatchSummary>
    where
        T: Sync,
        F: Fn(&T, usize) + Sync,
        S: Fn() -> bool,
    {
        let mut summary = BatchSummary::default();

        for batch in items.chunks(self.batch_size) {
            summary.batches += 1;
            summary.items_started += batch.len();

            crossbeam::thread::scope(|s| {
                for (slot, item) in batch.iter().enumerate() {
                    let work = &work;
                    s.spawn(move |_| work(item, slot));
                }
            })
            .map_err(|_| SearchError::WorkerPanic)?;

            if should_stop() {
                summary.stopped_early = summary.items_started < items.len();
                break;
            }
        }

        Ok(summary)
    }
}
