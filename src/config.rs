//! Process-wide parallelism configuration.

use std::env;
use std::thread;

use once_cell::sync::Lazy;

// Read once per process, like a seed override. Invalid or zero values fall
// back to the detected hardware concurrency.
static REQUESTED_PARALLELISM: Lazy<usize> = Lazy::new(|| {
    env::var("RBSORT_THREADS")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .filter(|&threads| threads > 0)
        .unwrap_or_else(hardware_parallelism)
});

/// Worker count requested via the `RBSORT_THREADS` environment variable,
/// defaulting to the hardware concurrency.
pub fn requested_parallelism() -> usize {
    *REQUESTED_PARALLELISM
}

pub(crate) fn hardware_parallelism() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Requested worker count clamped to hardware concurrency, at least 1.
pub(crate) fn usable_parallelism(requested: usize) -> usize {
    requested.min(hardware_parallelism()).max(1)
}

/// Largest power of two <= [`usable_parallelism`].
///
/// A power of two keeps the merge network's log-depth reduction well
/// defined.
pub(crate) fn effective_parallelism(requested: usize) -> usize {
    let usable = usable_parallelism(requested);
    1 << (usize::BITS - 1 - usable.leading_zeros())
}
