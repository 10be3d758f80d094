//! Dynamic-bitmap stabber.
//!
//! Like the ordered-map stabber but with the boundary set held in a
//! compressed bitmap: a stab is rank followed by select, and identifiers
//! live in a side hash map keyed by boundary position.

use ahash::AHashMap;
use roaring::RoaringTreemap;

use super::NestedIntervalStabber;
use crate::grammar::RuleId;

#[derive(Default)]
pub struct FastStabber {
    /// Begin and end+1 positions of inserted intervals
    position_bits: RoaringTreemap,
    /// Boundary position to the identifier in effect from there on; exits to
    /// uncovered ground carry no entry
    lookup: AHashMap<u64, RuleId>,
}

impl FastStabber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NestedIntervalStabber for FastStabber {
    fn stab(&self, i: u64) -> Option<RuleId> {
        let rank = self.position_bits.rank(i);
        if rank == 0 {
            return None;
        }
        let j = self.position_bits.select(rank - 1)?;
        self.lookup.get(&j).copied()
    }

    fn update(&mut self, begin: u64, end: u64, id: RuleId) {
        let parent = self.stab(begin);
        // An already-set end+1 bit is either another interval's exit or a
        // sibling's begin; its entry stays as is.
        if !self.position_bits.contains(end + 1) {
            self.position_bits.insert(end + 1);
            if let Some(parent_id) = parent {
                self.lookup.insert(end + 1, parent_id);
            }
        }
        self.position_bits.insert(begin);
        self.lookup.insert(begin, id);
    }
}
