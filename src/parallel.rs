//! Spawn-N, join-all, aggregate-outcomes worker group.
//!
//! Every parallel phase of the sort has the same shape: spawn one OS thread
//! per independent unit of work, wait for all of them, and fail the phase
//! if any unit failed. The join is a hard barrier; no phase overlaps the
//! next.

use std::thread;

use crate::task::TaskError;

/// Runs `jobs` on one scoped thread each and joins them all.
///
/// A job that panics marks the phase as failed, but every other job is
/// still joined before the failure is reported, so no thread outlives the
/// phase. Jobs must operate on disjoint data; nothing here synchronizes
/// access beyond the final join.
pub(crate) fn run_scoped<F>(phase: &'static str, jobs: Vec<F>) -> Result<(), TaskError>
where
    F: FnOnce() + Send,
{
    thread::scope(|s| {
        let handles: Vec<_> = jobs.into_iter().map(|job| s.spawn(job)).collect();

        let mut all_ok = true;
        for handle in handles {
            all_ok &= handle.join().is_ok();
        }

        if all_ok {
            Ok(())
        } else {
            Err(TaskError::Worker { phase })
        }
    })
}
