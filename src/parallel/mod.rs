//! Bounded batch execution on scoped threads
//!
//! The search spawns one thread per work item, but never more than a batch at
//! a time: a batch is started, joined in full, and the caller's stop check is
//! consulted before the next batch begins. This keeps thread creation bounded
//! by the hardware without needing a work queue, and lets each thread borrow
//! shared data from the caller's stack through `crossbeam::thread::scope`.
//!
//! ```rust
//! use zipcrack::parallel::BatchExecutor;
//!
//! let executor = BatchExecutor::new(4);
//! let summary = executor.execute(&[1, 2, 3, 4, 5], |item, _slot| {
//!     assert!(*item > 0);
//! }, || false).unwrap();
//! assert_eq!(summary.batches, 2);
//! assert_eq!(summary.items_started, 5);
//! ```

pub mod batch;

pub use batch::{BatchExecutor, BatchSummary, FALLBACK_PARALLELISM, detect_batch_size};
