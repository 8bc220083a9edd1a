use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared record of a single search run
///
/// The password slot is set at most once; the thread whose `OnceLock::set`
/// succeeds wins, and later discoveries never overwrite it. `found` is raised
/// only after the password is stored, so `is_found()` implies `password()`.
#[derive(Debug, Default)]
pub struct SearchState {
    found: AtomicBool,
    password: OnceLock<String>,
    cancelled: AtomicBool,
    running: AtomicBool,
    attempts: AtomicU64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted candidate. Returns true if this call won the race.
    pub fn try_record(&self, password: &str) -> bool {
        if self.password.set(password.to_owned()).is_err() {
            return false;
        }
        self.found.store(true, Ordering::Release);
        true
    }

    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Winning password, always `Some` once `is_found()` is true
    pub fn password(&self) -> Option<&str> {
        self.password.get().map(String::as_str)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Checked by workers and the enumerator between candidates
    pub fn should_stop(&self) -> bool {
        self.is_found() || self.is_cancelled()
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_first_record_wins() {
        let state = SearchState::new();
        assert!(!state.should_stop());
        assert!(state.try_record("first"));
        assert!(!state.try_record("second"));
        assert!(state.is_found());
        assert!(state.should_stop());
        assert_eq!(state.password(), Some("first"));
    }

    #[test]
    fn test_concurrent_records_have_single_winner() {
        let state = Arc::new(SearchState::new());
        let winners = Arc::new(AtomicUsize::new(0));

        crossbeam::thread::scope(|s| {
            for i in 0..16 {
                let state = state.clone();
                let winners = winners.clone();
                s.spawn(move |_| {
                    if state.try_record(&format!("pw{i}")) {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        })
        .unwrap();

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert!(state.password().unwrap().starts_with("pw"));
    }

    #[test]
    fn test_found_flag_never_precedes_password() {
        let state = SearchState::new();

        crossbeam::thread::scope(|s| {
            s.spawn(|_| {
                while !state.is_found() {
                    std::hint::spin_loop();
                }
                assert!(state.password().is_some());
            });
            for i in 0..8 {
                let state = &state;
                s.spawn(move |_| {
                    state.try_record(&format!("pw{i}"));
                });
            }
        })
        .unwrap();

        assert!(state.is_found());
    }

    #[test]
    fn test_cancel_stops_without_password() {
        let state = SearchState::new();
        state.cancel();
        assert!(state.should_stop());
        assert!(!state.is_found());
        assert_eq!(state.password(), None);
    }
}
