use super::charset::Charset;
use super::enumerator::Enumerator;
use super::state::SearchState;
use crate::tester::PasswordTester;

/// Searches every candidate that starts with one leading symbol
///
/// Lengths are tried shortest first. Workers with different leading symbols
/// never test the same string, so they need no coordination beyond the
/// shared stop signal.
pub struct Worker {
    leading: char,
    max_length: u32,
}

impl Worker {
    pub fn new(leading: char, max_length: u32) -> Self {
        Self { leading, max_length }
    }

    /// Run until the space is exhausted or the state says to stop.
    /// Returns true if this worker tested an accepted candidate.
    pub fn run<T: PasswordTester>(
        &self,
        charset: &Charset,
        tester: &T,
        state: &SearchState,
    ) -> bool {
        let mut enumerator = Enumerator::new(charset, tester, state);
        let mut buffer = candidate_buffer(self.leading, self.max_length);

        for length in 1..=self.max_length {
            if state.should_stop() {
                break;
            }

            let stop = if length == 1 {
                enumerator.attempt(&buffer)
            } else {
                enumerator.search(&mut buffer, length - 1)
            };

            if stop {
                tracing::trace!(leading = %self.leading, length, "Worker stopping");
                break;
            }
        }

        enumerator.accepted()
    }
}

/// Bytes reserved up front for the candidate buffer
const PREALLOCATED_CANDIDATE: usize = 64;

/// Buffer holding `leading`, sized for typical lengths only; longer
/// candidates grow it on demand
fn candidate_buffer(leading: char, max_length: u32) -> String {
    let capacity = (max_length as usize).clamp(1, PREALLOCATED_CANDIDATE);
    let mut buffer = String::with_capacity(capacity);
    buffer.push(leading);
    buffer
}
