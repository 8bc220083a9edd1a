//! Password verification adapters
//!
//! The search core only needs a yes/no verdict per candidate. Everything that
//! can go wrong while checking a candidate (missing archive, corrupt container,
//! wrong password, checksum mismatch halfway through the stream) is a rejection.
//!
//! Testers are shared by reference across all worker threads. Per-thread state,
//! such as a cached archive handle, lives in a [`PasswordTester::Session`] that
//! each worker creates for itself and never shares.

pub mod archive;

pub use archive::{EntryInfo, TargetEntry, ZipTester, ZipSession};

/// Decides whether a candidate password unlocks the target
pub trait PasswordTester: Sync {
    /// Per-worker state reused across that worker's candidates
    type Session;

    /// Create the state for one worker thread
    fn session(&self) -> Self::Session;

    /// Returns true only when the candidate is definitively accepted
    fn test(&self, session: &mut Self::Session, candidate: &str) -> bool;
}
