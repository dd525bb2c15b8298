//! Parallel radix sort for `i64` with odd-even merge recombination, rbsort.
//!
//! The input is split into a power-of-two number of chunks, each chunk is
//! sorted by an LSD radix sort on its own thread, and the sorted chunks are
//! recombined by a Batcher-style network of stride-2 merges, closed out by a
//! dense two-way merge of the surviving even and odd streams.

use crate::task::Task;

mod config;
mod merge;
mod parallel;
mod radix;
mod sort;
pub mod task;

pub use config::requested_parallelism;
pub use sort::SortTask;
pub use task::TaskError;

/// Sorts the slice in ascending order using the process-wide configured
/// parallelism, see [`requested_parallelism`].
///
/// Runs *O*(*n*) radix passes per chunk plus a log-depth merge network.
/// Allocates working and scratch buffers of the padded input length.
///
/// # Examples
///
/// ```
/// let mut v = [5i64, -3, 0, 2, -100, 42];
///
/// rbsort::sort(&mut v).unwrap();
/// assert_eq!(v, [-100, -3, 0, 2, 5, 42]);
/// ```
pub fn sort(v: &mut [i64]) -> Result<(), TaskError> {
    sort_with_parallelism(v, config::requested_parallelism())
}

/// Sorts the slice in ascending order with an explicit requested worker
/// count.
///
/// The worker count is clamped to the detected hardware concurrency and
/// rounded down to a power of two; a request of 1 sorts sequentially.
///
/// # Examples
///
/// ```
/// let mut v = [7i64, 7, 7, 7];
///
/// rbsort::sort_with_parallelism(&mut v, 2).unwrap();
/// assert_eq!(v, [7, 7, 7, 7]);
/// ```
pub fn sort_with_parallelism(v: &mut [i64], parallelism: usize) -> Result<(), TaskError> {
    let input = v.to_vec();
    SortTask::with_parallelism(&input, v, parallelism).execute()
}
