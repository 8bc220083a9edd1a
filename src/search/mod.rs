//! Brute-force password search
//!
//! Every leading symbol of the [`Charset`] gets its own [`Worker`], and the
//! [`Driver`] runs those workers in batches no larger than the machine's
//! parallelism. Each worker walks its share of the space depth-first with an
//! [`Enumerator`], shortest candidates first. The first accepted candidate is
//! recorded in the shared [`SearchState`] and every other worker unwinds at
//! its next branch boundary.
//!
//! ```text
//! Driver ──▶ batch of Workers ──▶ Enumerator ──▶ PasswordTester
//!    ▲                                                │
//!    └──────────── SearchState (found / cancel) ◀─────┘
//! ```

pub mod charset;
pub mod driver;
pub mod enumerator;
pub mod session;
pub mod state;
pub mod worker;

pub use charset::{Charset, DEFAULT_SYMBOLS};
pub use driver::Driver;
pub use enumerator::Enumerator;
pub use session::SearchSession;
pub use state::SearchState;
pub use worker::Worker;

use crate::error::{RequestError, Result};
use crate::tester::ZipTester;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What to search: one entry of one archive, up to a maximum length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    archive_path: PathBuf,
    entry_index: usize,
    max_length: u32,
}

impl SearchRequest {
    /// Validate and build a request
    ///
    /// Rejects a maximum length below 1 and an archive path that is missing,
    /// not a regular file or not readable. The archive's contents are not
    /// checked here; an unparseable archive simply rejects every candidate.
    pub fn new(
        archive_path: impl Into<PathBuf>,
        entry_index: usize,
        max_length: i64,
    ) -> std::result::Result<Self, RequestError> {
        let archive_path = archive_path.into();

        let max_length = u32::try_from(max_length)
            .ok()
            .filter(|len| *len >= 1)
            .ok_or(RequestError::MaxLength(max_length))?;

        if !archive_path.exists() {
            return Err(RequestError::ArchiveMissing(archive_path));
        }
        if !archive_path.is_file() {
            return Err(RequestError::NotAFile(archive_path));
        }
        if let Err(source) = File::open(&archive_path) {
            return Err(RequestError::Unreadable {
                path: archive_path,
                source,
            });
        }

        Ok(Self {
            archive_path,
            entry_index,
            max_length,
        })
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    pub fn max_length(&self) -> u32 {
        self.max_length
    }
}

/// How to search, independent of the target
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub charset: Charset,
    /// Upper bound on concurrent workers (0 = hardware parallelism)
    pub max_threads: usize,
    /// Cache one archive handle per worker instead of reopening per candidate
    pub reuse_handle: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            charset: Charset::default(),
            max_threads: 0,
            reuse_handle: true,
        }
    }
}

/// Terminal state of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found { password: String },
    /// Every candidate up to the maximum length was rejected
    Exhausted,
    /// The caller cancelled before a password was found
    Cancelled,
}

impl SearchOutcome {
    pub fn from_state(state: &SearchState) -> Self {
        match state.password() {
            Some(password) => SearchOutcome::Found {
                password: password.to_string(),
            },
            None if state.is_cancelled() => SearchOutcome::Cancelled,
            None => SearchOutcome::Exhausted,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            SearchOutcome::Found { password } => Some(password),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Outcome plus the numbers worth showing to a user
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    pub attempts: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub batch_size: usize,
    pub batches: usize,
    pub max_length: u32,
}

fn serialize_millis<S: serde::Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}

/// Run a complete search against a ZIP archive on the calling thread
pub fn run(request: &SearchRequest, options: &SearchOptions) -> Result<SearchReport> {
    run_with_state(request, options, &SearchState::new())
}

pub(crate) fn run_with_state(
    request: &SearchRequest,
    options: &SearchOptions,
    state: &SearchState,
) -> Result<SearchReport> {
    let tester = ZipTester::new(request.archive_path(), request.entry_index())
        .reuse_handle(options.reuse_handle);
    preflight(&tester);

    let batch_size = crate::parallel::detect_batch_size(options.max_threads);
    Driver::with_batch_size(&options.charset, &tester, batch_size).run(request.max_length(), state)
}

/// Log what the archive looks like before spending time on it
fn preflight(tester: &ZipTester) {
    match tester.inspect() {
        Ok(info) => match info.entry {
            Some(entry) if entry.encrypted => tracing::info!(
                entries = info.entries,
                "Target entry #{} '{}' ({} bytes)",
                tester.entry_index(),
                entry.name,
                entry.size
            ),
            Some(entry) => tracing::warn!(
                "Entry #{} '{}' is not encrypted; the first candidate will be accepted",
                tester.entry_index(),
                entry.name
            ),
            None => tracing::warn!(
                entries = info.entries,
                "Entry #{} does not exist; every candidate will be rejected",
                tester.entry_index()
            ),
        },
        Err(e) => tracing::warn!(
            "Could not read {} as a ZIP archive ({}); every candidate will be rejected",
            tester.path().display(),
            e
        ),
    }
}
