use super::charset::Charset;
use super::state::SearchState;
use super::worker::Worker;
use super::{SearchOutcome, SearchReport};
use crate::error::Result;
use crate::parallel::{BatchExecutor, detect_batch_size};
use crate::tester::PasswordTester;
use std::time::Instant;

/// Partitions the charset by leading symbol and runs workers in batches
pub struct Driver<'a, T: PasswordTester> {
    charset: &'a Charset,
    tester: &'a T,
    executor: BatchExecutor,
}

impl<'a, T: PasswordTester> Driver<'a, T> {
    /// Driver with a batch size matching the hardware parallelism
    pub fn new(charset: &'a Charset, tester: &'a T) -> Self {
        Self::with_batch_size(charset, tester, detect_batch_size(0))
    }

    pub fn with_batch_size(charset: &'a Charset, tester: &'a T, batch_size: usize) -> Self {
        Self {
            charset,
            tester,
            executor: BatchExecutor::new(batch_size),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.executor.batch_size()
    }

    /// Search all candidates up to `max_length` symbols
    ///
    /// `state` must be fresh for each run. It is shared so that a caller on
    /// another thread can observe progress or cancel.
    pub fn run(&self, max_length: u32, state: &SearchState) -> Result<SearchReport> {
        let started = Instant::now();
        let workers: Vec<Worker> = self
            .charset
            .symbols()
            .iter()
            .map(|&leading| Worker::new(leading, max_length))
            .collect();

        tracing::info!(
            symbols = self.charset.len(),
            batch_size = self.batch_size(),
            max_length,
            "Starting password search"
        );

        let summary = self.executor.execute(
            &workers,
            |worker, _slot| {
                worker.run(self.charset, self.tester, state);
            },
            || state.should_stop(),
        )?;

        let outcome = SearchOutcome::from_state(state);
        let report = SearchReport {
            outcome,
            attempts: state.attempts(),
            elapsed: started.elapsed(),
            batch_size: self.batch_size(),
            batches: summary.batches,
            max_length,
        };

        match &report.outcome {
            SearchOutcome::Found { .. } => tracing::info!(
                attempts = report.attempts,
                batches = report.batches,
                "Password found in {:.2}s",
                report.elapsed.as_secs_f64()
            ),
            SearchOutcome::Exhausted => tracing::info!(
                attempts = report.attempts,
                "Search space exhausted in {:.2}s",
                report.elapsed.as_secs_f64()
            ),
            SearchOutcome::Cancelled => tracing::warn!(
                attempts = report.attempts,
                "Search cancelled after {:.2}s",
                report.elapsed.as_secs_f64()
            ),
        }

        Ok(report)
    }
}
