use super::state::SearchState;
use super::{SearchOptions, SearchReport, SearchRequest, run_with_state};
use crate::error::{Result, SearchError};
use std::sync::Arc;
use std::thread::JoinHandle;

/// A search running on its own background thread
///
/// The session owns the only handle to that thread. Callers poll the
/// progress flags while it runs, then `join` (blocking) or `wait` (async) for
/// the report. Dropping a session that is still running cancels the search
/// and joins the thread, so worker threads never outlive their owner.
pub struct SearchSession {
    state: Arc<SearchState>,
    handle: Option<JoinHandle<Result<SearchReport>>>,
}

/// Clears the running flag however the search thread exits
struct RunningGuard<'a>(&'a SearchState);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.set_running(false);
    }
}

impl SearchSession {
    /// Start searching in the background
    pub fn spawn(request: SearchRequest, options: SearchOptions) -> Result<Self> {
        let state = Arc::new(SearchState::new());
        state.set_running(true);

        let thread_state = state.clone();
        let handle = std::thread::Builder::new()
            .name("zipcrack-search".to_string())
            .spawn(move || {
                let _running = RunningGuard(&thread_state);
                run_with_state(&request, &options, &thread_state)
            })
            .map_err(|e| {
                state.set_running(false);
                SearchError::Spawn(e)
            })?;

        Ok(Self {
            state,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_found(&self) -> bool {
        self.state.is_found()
    }

    pub fn attempts(&self) -> u64 {
        self.state.attempts()
    }

    /// Ask every worker to stop at its next branch boundary
    pub fn cancel(&self) {
        self.state.cancel();
    }

    /// Block until the search finishes
    pub fn join(mut self) -> Result<SearchReport> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| SearchError::WorkerPanic)?,
            None => Err(SearchError::WorkerPanic),
        }
    }

    /// Wait for the search without blocking the async runtime
    pub async fn wait(self) -> Result<SearchReport> {
        tokio::task::spawn_blocking(move || self.join())
            .await
            .map_err(|_| SearchError::WorkerPanic)?
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.state.cancel();
            if handle.join().is_err() {
                tracing::error!("Search thread panicked during shutdown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Charset, SearchOutcome};
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn garbage_archive(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("garbage.zip");
        std::fs::write(&path, b"not a zip").unwrap();
        path
    }

    #[test]
    fn test_join_reports_exhausted() {
        let dir = TempDir::new().unwrap();
        let request = SearchRequest::new(garbage_archive(&dir), 0, 2).unwrap();
        let options = SearchOptions {
            charset: Charset::new("abc").unwrap(),
            ..SearchOptions::default()
        };

        let session = SearchSession::spawn(request, options).unwrap();
        let report = session.join().unwrap();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert_eq!(report.attempts, 3 + 9);
    }

    #[test]
    fn test_cancel_stops_a_long_search() {
        let dir = TempDir::new().unwrap();
        // 92^8 candidates: never finishes without cancellation
        let request = SearchRequest::new(garbage_archive(&dir), 0, 8).unwrap();
        let session = SearchSession::spawn(request, SearchOptions::default()).unwrap();

        std::thread::sleep(Duration::from_millis(50));
        assert!(session.is_running());
        session.cancel();

        let started = Instant::now();
        let report = session.join().unwrap();
        assert_eq!(report.outcome, SearchOutcome::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_drop_cancels_and_joins() {
        let dir = TempDir::new().unwrap();
        let request = SearchRequest::new(garbage_archive(&dir), 0, 8).unwrap();
        let session = SearchSession::spawn(request, SearchOptions::default()).unwrap();
        let state = session.state.clone();

        drop(session);
        assert!(state.is_cancelled());
        assert!(!state.is_running());
    }

    #[tokio::test]
    async fn test_wait_in_async_context() {
        let dir = TempDir::new().unwrap();
        let request = SearchRequest::new(garbage_archive(&dir), 0, 1).unwrap();
        let session = SearchSession::spawn(request, SearchOptions::default()).unwrap();

        let report = session.wait().await.unwrap();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert_eq!(report.attempts, 92);
    }
}
