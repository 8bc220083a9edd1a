use super::charset::Charset;
use super::state::SearchState;
use crate::tester::PasswordTester;

/// Depth-first candidate generator for a single worker
///
/// The candidate buffer follows stack discipline: a symbol is pushed before
/// descending and popped on backtrack, so its length always equals the
/// current depth. Owns the worker's tester session.
pub struct Enumerator<'a, T: PasswordTester> {
    charset: &'a Charset,
    tester: &'a T,
    session: T::Session,
    state: &'a SearchState,
    accepted: bool,
}

impl<'a, T: PasswordTester> Enumerator<'a, T> {
    pub fn new(charset: &'a Charset, tester: &'a T, state: &'a SearchState) -> Self {
        Self {
            charset,
            tester,
            session: tester.session(),
            state,
            accepted: false,
        }
    }

    /// Test one complete candidate, recording it if accepted
    ///
    /// Returns true when the candidate was accepted, even if another worker
    /// won the race to record its own password first.
    pub fn attempt(&mut self, candidate: &str) -> bool {
        self.state.record_attempt();
        if !self.tester.test(&mut self.session, candidate) {
            return false;
        }
        self.accepted = true;
        if self.state.try_record(candidate) {
            tracing::debug!(length = candidate.len(), "Candidate accepted");
        }
        true
    }

    /// Whether any candidate tested by this enumerator was accepted
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Extend `buffer` by exactly `remaining` symbols, testing each completion
    ///
    /// Returns true if the search should unwind, either because a candidate
    /// here was accepted or because the shared state says to stop. On a true
    /// return the buffer is left as it was at the point of success.
    pub fn search(&mut self, buffer: &mut String, remaining: u32) -> bool {
        if remaining == 0 {
            return self.attempt(buffer);
        }

        let charset = self.charset;
        for &symbol in charset.symbols() {
            if self.state.should_stop() {
                return true;
            }
            buffer.push(symbol);
            if self.search(buffer, remaining - 1) {
                return true;
            }
            buffer.pop();
        }

        false
    }
}
