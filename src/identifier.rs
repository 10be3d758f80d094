//! Identifier assignment for repeats.
//!
//! LCP-intervals that extend the same repeated factor leftwards share the
//! text position where the factor's first occurrence ends (`SA[begin] + lcp`),
//! so identifiers are keyed by that position. Identifiers below sigma are
//! reserved for the terminals; the counter starts right above them.

use ahash::AHashMap;

use crate::grammar::RuleId;
use crate::index::TextIndex;

pub struct RepeatIds<'a> {
    index: &'a TextIndex,
    next: RuleId,
    by_position: AHashMap<u64, RuleId>,
}

impl<'a> RepeatIds<'a> {
    pub fn new(index: &'a TextIndex) -> Self {
        Self {
            index,
            next: index.sigma(),
            by_position: AHashMap::new(),
        }
    }

    /// The identifier the next unseen interval will receive.
    pub fn next_id(&self) -> RuleId {
        self.next
    }

    /// Identifier for the interval `(lcp, begin, ..)`, assigning a fresh one
    /// on first sight.
    pub fn get(&mut self, lcp: u64, begin: u64) -> RuleId {
        let position = self.index.sa(begin) + lcp;
        if let Some(&id) = self.by_position.get(&position) {
            return id;
        }
        let id = self.next;
        self.next += 1;
        self.by_position.insert(position, id);
        id
    }

    /// Drop the mapping for the interval so a longer left extension sharing
    /// its end position takes a fresh identifier.
    pub fn remove(&mut self, lcp: u64, begin: u64) {
        self.by_position.remove(&(self.index.sa(begin) + lcp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_above_terminals() {
        let index = TextIndex::from_bytes(b"abab").unwrap();
        let mut ids = RepeatIds::new(&index);
        assert_eq!(ids.next_id(), 3);
        let first = ids.get(1, 3);
        assert_eq!(first, 3);
        assert_eq!(ids.next_id(), 4);
    }

    #[test]
    fn test_same_end_position_shares_id() {
        // In "abab" the interval (1, [3,4]) and the interval (2, [1,2]) both
        // describe a factor whose first occurrence ends at text position 4.
        let index = TextIndex::from_bytes(b"abab").unwrap();
        let mut ids = RepeatIds::new(&index);
        let a = ids.get(1, 3);
        let b = ids.get(2, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_forces_fresh_id() {
        let index = TextIndex::from_bytes(b"abab").unwrap();
        let mut ids = RepeatIds::new(&index);
        let a = ids.get(1, 3);
        ids.remove(1, 3);
        let b = ids.get(2, 1);
        assert_ne!(a, b);
    }
}
