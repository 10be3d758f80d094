//! LCP-interval enumeration in length-lexicographic order.
//!
//! Implements the algorithm of Beller et al., "Space-Efficient Computation of
//! Maximal and Supermaximal Repeats in Genome Sequences": a breadth-first
//! walk over the BWT that yields every LCP-interval of the text, shortest
//! first, together with the number of distinct left extensions.
//!
//! O(n log sigma) time and O(n + sigma) extra space over the index.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::index::bitvec::BitVec;
use crate::index::TextIndex;

/// One LCP-interval record.
///
/// `begin..=end` is the suffix-array range whose suffixes share a common
/// prefix of length exactly `lcp`. `left_extensions` counts the distinct BWT
/// symbols over the range (sentinel included); a value above 1 marks a
/// maximal repeat. `local_max` is true when no examined sub-range of the
/// interval spanned more than one suffix-array row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcpInterval {
    pub lcp: u64,
    pub begin: u64,
    pub end: u64,
    pub left_extensions: u64,
    pub local_max: bool,
}

/// Lazy stream of all LCP-intervals of an indexed text, in non-decreasing
/// `lcp` order. The first record is always the whole-text interval at
/// `lcp = 0`; consumers typically skip it.
///
/// The stream is finite and cannot be restarted; build a new enumerator to
/// iterate again.
pub struct LcpIntervals<'a> {
    index: &'a TextIndex,
    /// One FIFO of half-open `(lb, rb)` ranges per compacted symbol
    queues: Vec<VecDeque<(u64, u64)>>,
    /// Snapshot of queue lengths at the start of the current round
    queue_sizes: Vec<usize>,
    /// Right boundaries already credited to an emitted interval
    finished: BitVec,
    /// Distinct left extensions accumulated for the interval being assembled
    extensions: AHashSet<u64>,
    /// LCP value of the current round
    lcp_value: u64,
    /// Right boundary of the last unfinished sub-range seen at this value
    last_idx: u64,
    /// Left boundary of the interval being assembled
    last_lb: u64,
    local_max: bool,
    /// Live ranges across all queues
    pending: u64,
    /// Queue currently being drained within the round
    cursor: usize,
    in_round: bool,
}

impl<'a> LcpIntervals<'a> {
    pub fn new(index: &'a TextIndex) -> Self {
        let n = index.n();
        let sigma = index.sigma() as usize;

        let mut finished = BitVec::zeroed(n as usize + 1);
        finished.set(0);
        finished.set(n as usize);

        // Seed each symbol's queue with its full suffix-array range
        let mut queues = Vec::with_capacity(sigma);
        for k in 0..sigma as u64 {
            let mut queue = VecDeque::new();
            queue.push_back((index.c(k), index.c(k + 1)));
            queues.push(queue);
        }

        Self {
            index,
            queues,
            queue_sizes: vec![0; sigma],
            finished,
            extensions: AHashSet::new(),
            lcp_value: 0,
            last_idx: 0,
            last_lb: 0,
            local_max: true,
            pending: sigma as u64,
            cursor: 0,
            in_round: false,
        }
    }

    /// Examine one dequeued range; returns a record when it completes an
    /// interval.
    fn process(&mut self, lb: u64, rb: u64) -> Option<LcpInterval> {
        let rb_finished = self.finished.get(rb as usize);
        if rb_finished && self.last_idx != lb {
            return None;
        }

        // Left-extend the range: every distinct BWT symbol joins the
        // extension set, and all but the sentinel spawn a child range one
        // value deeper.
        for sym in self.index.interval_symbols(lb, rb) {
            self.extensions.insert(sym.comp);
            if sym.comp == 0 {
                continue;
            }
            let base = self.index.c(sym.comp);
            self.queues[sym.comp as usize].push_back((base + sym.rank_lb, base + sym.rank_rb));
            self.pending += 1;
        }

        if !rb_finished {
            self.finished.set(rb as usize);
            if self.last_idx != lb {
                // First sub-range of a new interval
                self.last_lb = lb;
                self.local_max = true;
            }
            if lb != rb - 1 {
                self.local_max = false;
            }
            self.last_idx = rb;
            None
        } else {
            // This sub-range chains onto last_idx and its right boundary is
            // already finished: the interval is complete.
            if lb != rb - 1 {
                self.local_max = false;
            }
            let record = LcpInterval {
                lcp: self.lcp_value,
                begin: self.last_lb,
                end: rb - 1,
                left_extensions: self.extensions.len() as u64,
                local_max: self.local_max,
            };
            self.extensions.clear();
            self.last_lb = 0;
            self.last_idx = 0;
            self.local_max = true;
            Some(record)
        }
    }
}

impl Iterator for LcpIntervals<'_> {
    type Item = LcpInterval;

    fn next(&mut self) -> Option<LcpInterval> {
        loop {
            if !self.in_round {
                if self.pending == 0 {
                    return None;
                }
                // Children discovered during this round belong to the next
                // value; only the snapshot is drained now.
                for (size, queue) in self.queue_sizes.iter_mut().zip(&self.queues) {
                    *size = queue.len();
                }
                self.cursor = 0;
                self.in_round = true;
            }

            while self.cursor < self.queues.len() {
                if self.queue_sizes[self.cursor] == 0 {
                    self.cursor += 1;
                    continue;
                }
                self.queue_sizes[self.cursor] -= 1;
                let Some((lb, rb)) = self.queues[self.cursor].pop_front() else {
                    self.queue_sizes[self.cursor] = 0;
                    continue;
                };
                self.pending -= 1;
                if let Some(record) = self.process(lb, rb) {
                    return Some(record);
                }
            }

            self.lcp_value += 1;
            self.in_round = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals_of(text: &[u8]) -> Vec<LcpInterval> {
        let index = TextIndex::from_bytes(text).unwrap();
        LcpIntervals::new(&index).collect()
    }

    #[test]
    fn test_first_record_is_whole_text() {
        for text in [&b"a"[..], b"abab", b"abracadabra"] {
            let index = TextIndex::from_bytes(text).unwrap();
            let first = LcpIntervals::new(&index).next().unwrap();
            assert_eq!(first.lcp, 0);
            assert_eq!(first.begin, 0);
            assert_eq!(first.end, index.n() - 1);
        }
    }

    #[test]
    fn test_non_decreasing_lcp() {
        for text in [&b"abab"[..], b"abracadabra", b"aaaaaaaa", b"mississippi"] {
            let records = intervals_of(text);
            for w in records.windows(2) {
                assert!(w[0].lcp <= w[1].lcp);
            }
        }
    }

    #[test]
    fn test_intervals_are_distinct() {
        for text in [&b"abab"[..], b"abracadabra", b"mississippi"] {
            let records = intervals_of(text);
            let mut seen = AHashSet::new();
            for r in records {
                assert!(
                    seen.insert((r.lcp, r.begin, r.end)),
                    "duplicate interval {:?}",
                    (r.lcp, r.begin, r.end)
                );
            }
        }
    }

    #[test]
    fn test_abab_intervals() {
        // SA of "abab\0" is [4, 2, 0, 3, 1]
        let records = intervals_of(b"abab");
        // After the whole-text record: the "b" interval at lcp 1, then the
        // maximal "ab" interval at lcp 2.
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].lcp, 1);
        assert_eq!((records[1].begin, records[1].end), (3, 4));
        assert_eq!(records[1].left_extensions, 1);
        assert!(records[1].local_max);
        assert_eq!(records[2].lcp, 2);
        assert_eq!((records[2].begin, records[2].end), (1, 2));
        assert_eq!(records[2].left_extensions, 2);
        assert!(records[2].local_max);
    }

    #[test]
    fn test_run_chains_share_end() {
        // In a^8 every value 1..=7 has exactly one interval [lcp, 8] and the
        // sentinel counts as a second left extension throughout.
        let records = intervals_of(b"aaaaaaaa");
        assert_eq!(records.len(), 8);
        for (i, r) in records.iter().enumerate().skip(1) {
            assert_eq!(r.lcp, i as u64);
            assert_eq!((r.begin, r.end), (i as u64, 8));
            assert_eq!(r.left_extensions, 2);
            // Only the last level consists of singleton sub-ranges
            assert_eq!(r.local_max, i == 7);
        }
    }

    #[test]
    fn test_extension_counts_cover_bwt_range() {
        // Every emitted interval's extension count matches a direct scan of
        // the BWT symbols over its range.
        let text = b"mississippi";
        let index = TextIndex::from_bytes(text).unwrap();
        for r in LcpIntervals::new(&index) {
            let expected = index
                .interval_symbols(r.begin, r.end + 1)
                .len() as u64;
            assert_eq!(r.left_extensions, expected, "interval {:?}", r);
        }
    }
}
