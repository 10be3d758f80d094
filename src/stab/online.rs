//! Ordered-map stabber.
//!
//! Keeps one entry per interval boundary: the begin position maps to the
//! interval's identifier and the position one past the end maps to the
//! enclosing interval's identifier (or nothing). A stab is then a predecessor
//! lookup. O(log m) per operation for m inserted intervals.

use std::collections::BTreeMap;

use super::NestedIntervalStabber;
use crate::grammar::RuleId;

#[derive(Default)]
pub struct OnlineStabber {
    /// Boundary position to the identifier in effect from that position on;
    /// `None` marks an exit back to uncovered ground
    lookup: BTreeMap<u64, Option<RuleId>>,
}

impl OnlineStabber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NestedIntervalStabber for OnlineStabber {
    fn stab(&self, i: u64) -> Option<RuleId> {
        self.lookup
            .range(..=i)
            .next_back()
            .and_then(|(_, &id)| id)
    }

    fn update(&mut self, begin: u64, end: u64, id: RuleId) {
        let parent = self.stab(begin);
        // If end+1 is already a boundary it is either another interval's exit
        // (sharing our end) or a sibling's begin; both must keep their value.
        self.lookup.entry(end + 1).or_insert(parent);
        self.lookup.insert(begin, Some(id));
    }
}
