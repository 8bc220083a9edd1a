//! # zipcrack - Parallel brute-force recovery of ZipCrypto passwords
//!
//! zipcrack searches for the password of one encrypted entry in a ZIP archive
//! by trying every candidate over a fixed alphabet, shortest first:
//!
//! - **Parallel**: one worker per leading symbol, run in batches sized to the CPU count
//! - **Exact**: every candidate is checked by decrypting the whole entry and
//!   comparing its CRC, so ZipCrypto's one-byte header check cannot fool it
//! - **Cancellable**: the first match stops every other worker
//!
//! ## Quick Start
//!
//! ```bash
//! # Try every password of up to 4 symbols
//! zipcrack crack secret.zip
//!
//! # Longer passwords, second entry, JSON report
//! zipcrack crack secret.zip --max-length 6 --entry 1 --format json
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use zipcrack::search::{self, SearchOptions, SearchRequest};
//!
//! # fn main() -> anyhow::Result<()> {
//! let request = SearchRequest::new("secret.zip", 0, 3)?;
//! let report = search::run(&request, &SearchOptions::default())?;
//! if let Some(password) = report.outcome.password() {
//!     println!("password: {password}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod parallel;
pub mod persist;
pub mod search;
pub mod tester;

pub use cli::{Cli, Output};
pub use config::ZipcrackConfig;
pub use error::{RequestError, SearchError};
pub use search::{SearchOptions, SearchOutcome, SearchReport, SearchRequest, SearchSession};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
