//! The sort task: buffer preparation, partitioned local sort, merge
//! network orchestration, and the output copy.

use std::mem;

use crate::config;
use crate::merge;
use crate::parallel;
use crate::radix;
use crate::task::{Task, TaskError};

/// Padding value for the working buffer; pads collate last and are
/// dropped on output.
const PAD: i64 = i64::MAX;

/// Raw handle to one of the element buffers, copied into merge workers.
///
/// Carries no synchronization. Each worker stays on the stride-2 index
/// set selected by its region and bias, so concurrently live handles
/// never touch the same offset.
#[derive(Copy, Clone)]
struct BufPtr(*mut i64);

unsafe impl Send for BufPtr {}

/// Sorts a caller-owned input buffer into a caller-owned output buffer of
/// the same length, through the [`Task`] lifecycle.
///
/// The working and scratch buffers live from `pre_process` to
/// `post_process` and are released on every exit path; no state persists
/// across invocations.
pub struct SortTask<'a> {
    input: &'a [i64],
    output: &'a mut [i64],
    /// Requested worker count, as configured.
    parallelism: usize,
    /// Requested count clamped to hardware concurrency.
    usable: usize,
    /// Largest power of two <= `usable`; chunk count and network width.
    threads: usize,
    /// Elements per chunk; `chunk_len * threads` is the padded length.
    chunk_len: usize,
    work: Vec<i64>,
    scratch: Vec<i64>,
}

impl<'a> SortTask<'a> {
    /// Creates a task with the process-wide configured parallelism.
    pub fn new(input: &'a [i64], output: &'a mut [i64]) -> Self {
        Self::with_parallelism(input, output, config::requested_parallelism())
    }

    /// Creates a task with an explicit requested worker count.
    pub fn with_parallelism(input: &'a [i64], output: &'a mut [i64], parallelism: usize) -> Self {
        Self {
            input,
            output,
            parallelism,
            usable: 1,
            threads: 1,
            chunk_len: 0,
            work: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// One worker per chunk pair; every chunk is sorted before this
    /// returns.
    fn local_sort(&mut self) -> Result<(), TaskError> {
        let chunk_len = self.chunk_len;
        let jobs: Vec<_> = self
            .work
            .chunks_mut(chunk_len)
            .zip(self.scratch.chunks_mut(chunk_len))
            .map(|(chunk, scratch)| move || radix::radix_sort_signed(chunk, scratch))
            .collect();

        parallel::run_scoped("local sort", jobs)
    }

    /// Folds `threads` sorted chunks down to two interleaved sorted
    /// streams. Each level halves the group count and is fully joined
    /// before the next, narrower level starts.
    fn merge_network(&mut self) -> Result<(), TaskError> {
        let work = BufPtr(self.work.as_mut_ptr());
        let scratch = BufPtr(self.scratch.as_mut_ptr());

        let mut level = self.threads;
        while level > 1 {
            let len = self.chunk_len * (self.threads / level);

            let jobs: Vec<_> = (0..level)
                .map(|worker| {
                    move || {
                        // Capture the whole `Send` wrappers, not their raw
                        // pointer fields (disjoint closure capture would
                        // otherwise capture `*mut i64`, which is not `Send`).
                        let work = work;
                        let scratch = scratch;

                        let stride = worker / 2;
                        let bias = worker % 2;
                        let base = stride * 2 * len + bias;

                        // SAFETY: every offset touched through `base` lies
                        // within the region `[stride * 2 * len, (stride + 1)
                        // * 2 * len)` of the `level * len`-element buffers,
                        // and has parity `bias` within it. Workers of this
                        // level run on distinct (region, parity) pairs and
                        // the level is joined before the buffers are used
                        // again, so no offset is accessed concurrently.
                        unsafe {
                            merge::odd_even_merge(
                                scratch.0.add(base),
                                work.0.add(base),
                                work.0.add(base + len),
                                len - bias,
                                len - bias,
                            );
                        }
                    }
                })
                .collect();

            parallel::run_scoped("merge network", jobs)?;

            level /= 2;
        }

        Ok(())
    }
}

impl Task for SortTask<'_> {
    fn validate(&self) -> Result<(), TaskError> {
        if self.output.len() != self.input.len() {
            return Err(TaskError::Validation(
                "output length must match input length",
            ));
        }

        Ok(())
    }

    fn pre_process(&mut self) -> Result<(), TaskError> {
        let n_input = self.input.len();

        self.usable = config::usable_parallelism(self.parallelism);
        self.threads = config::effective_parallelism(self.parallelism);

        // Pad up to a multiple of 2 * threads so every chunk is even-sized
        // and the network's stream lengths stay uniform.
        let span = 2 * self.threads;
        let n = n_input + (span - n_input % span) % span;
        self.chunk_len = n / self.threads;

        self.work = Vec::with_capacity(n);
        self.work.extend_from_slice(self.input);
        self.work.resize(n, PAD);
        self.scratch = vec![0; n];

        Ok(())
    }

    fn run(&mut self) -> Result<(), TaskError> {
        let n_input = self.input.len();
        if n_input == 0 {
            return Ok(());
        }

        // Tiny inputs gain nothing from the network; one local sort over
        // the unpadded range avoids oversubscription.
        if self.parallelism == 1 || self.usable > 2 * n_input {
            radix::radix_sort_signed(&mut self.work[..n_input], &mut self.scratch[..n_input]);
            return Ok(());
        }

        self.local_sort()?;
        self.merge_network()?;

        // The network leaves two interleaved sorted streams; merge them
        // densely and keep the result in `work`.
        merge::final_merge(&self.work, &mut self.scratch);
        mem::swap(&mut self.work, &mut self.scratch);

        Ok(())
    }

    fn post_process(&mut self) -> Result<(), TaskError> {
        self.output.copy_from_slice(&self.work[..self.input.len()]);

        self.work = Vec::new();
        self.scratch = Vec::new();

        Ok(())
    }
}
