//! Suffix array construction.
//!
//! Comparison-based sort of suffix positions. The sentinel terminator is the
//! unique smallest byte, so every comparison terminates at a mismatch. Large
//! inputs sort in parallel.

use rayon::prelude::*;

/// Inputs above this size use a parallel sort
const PARALLEL_THRESHOLD: usize = 100_000;

/// Build the suffix array of `text` (which must end with a unique smallest
/// sentinel byte): the suffix start positions in lexicographic order.
///
/// Time: O(n log n) comparisons, each bounded by the distance to the next
/// mismatch. Space: O(n) for the position array.
pub fn build_suffix_array(text: &[u8]) -> Vec<u64> {
    let n = text.len();
    let mut sa: Vec<u64> = (0..n as u64).collect();

    if n > PARALLEL_THRESHOLD {
        sa.par_sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    } else {
        sa.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    }

    sa
}

/// Invert a suffix array: `isa[sa[i]] = i`.
pub fn invert(sa: &[u64]) -> Vec<u64> {
    let mut isa = vec![0u64; sa.len()];
    for (rank, &pos) in sa.iter().enumerate() {
        isa[pos as usize] = rank as u64;
    }
    isa
}
