//! LSD radix sort for one chunk, with a signed adapter.
//!
//! The unsigned sort runs 8 counting-sort passes, least-significant byte
//! first. Signed values are sorted through their unsigned bit patterns and
//! fixed up afterwards: under unsigned comparison every negative value
//! (high bit set) collates after every non-negative one, as one internally
//! sorted block, so a single rotation restores signed order.

/// Byte positions per key, one counting-sort pass each.
const PASSES: usize = u64::BITS as usize / 8;

/// Builds the placement offsets for one byte position: a histogram of the
/// byte values in `keys`, folded into a stable exclusive prefix sum.
fn byte_offsets(keys: &[u64], shift: u32) -> [usize; 256] {
    let mut offsets = [0usize; 256];

    for key in keys {
        offsets[((key >> shift) & 0xFF) as usize] += 1;
    }

    let mut sum = 0;
    for count in offsets.iter_mut() {
        let here = *count;
        *count = sum;
        sum += here;
    }

    offsets
}

/// Sorts `keys` ascending as unsigned values. `scratch` must be the same
/// length; it holds each pass's output before the copy-back.
fn radix_sort_unsigned(keys: &mut [u64], scratch: &mut [u64]) {
    debug_assert_eq!(keys.len(), scratch.len());

    for pass in 0..PASSES {
        let shift = (pass * 8) as u32;
        let mut offsets = byte_offsets(keys, shift);

        // Scatter in input order through the incremented offsets, which
        // keeps equal bytes in their previous relative order.
        for &key in keys.iter() {
            let byte = ((key >> shift) & 0xFF) as usize;
            scratch[offsets[byte]] = key;
            offsets[byte] += 1;
        }

        keys.copy_from_slice(scratch);
    }
}

/// Sorts `chunk` ascending as signed values.
///
/// The i64 -> u64 reinterpretation is confined to this boundary; callers
/// and the merge phases only ever see `i64`.
pub(crate) fn radix_sort_signed(chunk: &mut [i64], scratch: &mut [i64]) {
    debug_assert_eq!(chunk.len(), scratch.len());

    if chunk.len() < 2 {
        return;
    }

    radix_sort_unsigned(
        bytemuck::cast_slice_mut(chunk),
        bytemuck::cast_slice_mut(scratch),
    );

    // Layout is now [non-negatives ascending][negatives ascending]. Move
    // the negative block to the front; if there is none, leave it alone.
    let non_negative = chunk.iter().take_while(|&&val| val >= 0).count();
    if non_negative < chunk.len() {
        chunk.rotate_right(chunk.len() - non_negative);
    }
}
