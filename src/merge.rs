//! Stride-2 odd-even merge and the final dense interleave merge.

/// Merges two sorted stride-2 streams into a stride-2 destination, then
/// copies the merged stream back into the left stream's storage.
///
/// `left` and `right` are read at offsets `0, 2, ..` below `len_l` and
/// `len_r`; the merged stream is written to `dst` at offsets `0, 2, ..`
/// below `len_l + len_r` and mirrored back to `left` at the same offsets.
/// Keeping the stride-2 interleave is what lets the next network level
/// treat the result as one of its input streams.
///
/// # Safety
///
/// `left` and `dst` must be valid for reads and writes and `right` for
/// reads at all touched offsets, and no other thread may access those
/// offsets concurrently. Workers of one merge level uphold this by parity:
/// a worker only ever touches offsets of its own bias within its own
/// region.
pub(crate) unsafe fn odd_even_merge(
    dst: *mut i64,
    left: *mut i64,
    right: *const i64,
    len_l: usize,
    len_r: usize,
) {
    let mut iter_l = 0;
    let mut iter_r = 0;
    let mut iter_dst = 0;

    while iter_l < len_l && iter_r < len_r {
        if *left.add(iter_l) < *right.add(iter_r) {
            *dst.add(iter_dst) = *left.add(iter_l);
            iter_l += 2;
        } else {
            *dst.add(iter_dst) = *right.add(iter_r);
            iter_r += 2;
        }

        iter_dst += 2;
    }

    while iter_l < len_l {
        *dst.add(iter_dst) = *left.add(iter_l);
        iter_l += 2;
        iter_dst += 2;
    }

    while iter_r < len_r {
        *dst.add(iter_dst) = *right.add(iter_r);
        iter_r += 2;
        iter_dst += 2;
    }

    let mut i = 0;
    while i < iter_dst {
        *left.add(i) = *dst.add(i);
        i += 2;
    }
}

/// Merges the even-indexed and odd-indexed streams of `work`, each sorted
/// ascending, into `scratch` as one dense sorted sequence.
pub(crate) fn final_merge(work: &[i64], scratch: &mut [i64]) {
    debug_assert_eq!(work.len(), scratch.len());

    let n = work.len();
    let mut iter_even = 0;
    let mut iter_odd = 1;
    let mut out = 0;

    while iter_even < n && iter_odd < n {
        if work[iter_even] < work[iter_odd] {
            scratch[out] = work[iter_even];
            iter_even += 2;
        } else {
            scratch[out] = work[iter_odd];
            iter_odd += 2;
        }

        out += 1;
    }

    while iter_even < n {
        scratch[out] = work[iter_even];
        iter_even += 2;
        out += 1;
    }

    while iter_odd < n {
        scratch[out] = work[iter_odd];
        iter_odd += 2;
        out += 1;
    }
}
