//! Preprocessed stabber with bitset identifiers.
//!
//! Enumerates every maximal LCP-interval of the index up front and assigns
//! each one a bit. An interval's internal identifier is the bitset holding
//! its own bit plus the bits of all its ancestors, so identity and nesting
//! depth travel together in one value. Bits are handed out in descending
//! order along a left-to-right sweep, which makes the deepest interval of any
//! ancestor chain the minimum bit of its bitset.
//!
//! A stab resolves a position to the deepest preprocessed interval via
//! rank/select over the boundary set, then intersects that interval's bitset
//! with the accumulated `update_id` mask to find the deepest interval that
//! has actually been inserted. Bitsets are compressed bitmaps; ancestor
//! chains produce long runs, so the intersections stay cheap in practice.

use std::rc::Rc;

use ahash::AHashMap;
use roaring::RoaringTreemap;

use super::NestedIntervalStabber;
use crate::grammar::RuleId;
use crate::index::TextIndex;
use crate::lcp::LcpIntervals;

pub struct OptimalStabber {
    /// Boundary position to the bitset of the deepest interval in effect
    /// from that position on
    lookup: AHashMap<u64, Rc<RoaringTreemap>>,
    /// Begin and end+1 positions of all preprocessed intervals
    position_bits: RoaringTreemap,
    /// Own bits of every inserted interval
    update_id: RoaringTreemap,
    /// Interval bit to the externally assigned identifier
    id_map: AHashMap<u64, RuleId>,
}

impl OptimalStabber {
    /// Preprocess all maximal LCP-intervals of `index`. O(n log sigma) for
    /// the enumeration plus O(n) for the sweep.
    pub fn new(index: &TextIndex) -> Self {
        let n = index.n();

        // Pass 1: collect maximal intervals, their boundary positions, and
        // their end positions binned under each begin. Bins keep discovery
        // order: shorter values first, so wider intervals precede the
        // intervals nested inside them that share a begin.
        let mut position_bits = RoaringTreemap::new();
        let mut bins: AHashMap<u64, Vec<u64>> = AHashMap::new();
        let mut num_repeats: u64 = 0;

        let mut intervals = LcpIntervals::new(index);
        let _ = intervals.next(); // whole-text interval
        for record in intervals {
            if record.left_extensions > 1 {
                num_repeats += 1;
                position_bits.insert(record.begin);
                let exit = record.end + 1;
                if exit < n {
                    position_bits.insert(exit);
                }
                bins.entry(record.begin).or_default().push(record.end);
            }
        }

        // Pass 2: sweep positions left to right, maintaining the stack of
        // open intervals. Bits are assigned in descending order, so any
        // interval's bit is smaller than all of its ancestors' bits.
        let mut lookup: AHashMap<u64, Rc<RoaringTreemap>> =
            AHashMap::with_capacity(position_bits.len() as usize);
        let mut next_bit = num_repeats;
        let mut end_stack: Vec<u64> = Vec::new();
        let mut id_stack: Vec<Rc<RoaringTreemap>> = vec![Rc::new(RoaringTreemap::new())];

        for i in 0..n.saturating_sub(1) {
            let mut popped = false;
            while let Some(&top_end) = end_stack.last() {
                if top_end != i {
                    break;
                }
                end_stack.pop();
                id_stack.pop();
                popped = true;
            }
            // Record what the exit re-exposes, once all intervals ending
            // here are closed; the bottom of the stack is open ground, not
            // an interval.
            if popped && id_stack.len() > 1 {
                if let Some(top) = id_stack.last() {
                    lookup.insert(i + 1, Rc::clone(top));
                }
            }

            if let Some(ends) = bins.get(&i) {
                for &end in ends {
                    end_stack.push(end);
                    next_bit -= 1;
                    let mut bits = match id_stack.last() {
                        Some(parent) => parent.as_ref().clone(),
                        None => RoaringTreemap::new(),
                    };
                    bits.insert(next_bit);
                    id_stack.push(Rc::new(bits));
                }
                // Only the deepest interval opening here matters: a stab at
                // this begin always wants the innermost bitset.
                if let Some(top) = id_stack.last() {
                    lookup.insert(i, Rc::clone(top));
                }
            }
        }

        Self {
            lookup,
            position_bits,
            update_id: RoaringTreemap::new(),
            id_map: AHashMap::new(),
        }
    }

    /// Bitset of the deepest preprocessed interval containing `i`, inserted
    /// or not.
    fn position_stab(&self, i: u64) -> Option<&Rc<RoaringTreemap>> {
        let rank = self.position_bits.rank(i);
        if rank == 0 {
            return None;
        }
        let j = self.position_bits.select(rank - 1)?;
        self.lookup.get(&j)
    }
}

impl NestedIntervalStabber for OptimalStabber {
    fn stab(&self, i: u64) -> Option<RuleId> {
        let bits = self.position_stab(i)?;
        // The minimum of the updated ancestor bits is the deepest inserted
        // interval containing i.
        let ancestors = &self.update_id & bits.as_ref();
        let bit = ancestors.min()?;
        self.id_map.get(&bit).copied()
    }

    fn update(&mut self, begin: u64, end: u64, id: RuleId) {
        // Both endpoints of a preprocessed interval stab to bitsets whose
        // intersection is exactly the interval's own ancestor chain, making
        // its minimum the interval's own bit.
        let begin_bits = self
            .position_stab(begin)
            .expect("updated interval must have been preprocessed");
        let end_bits = self
            .position_stab(end)
            .expect("updated interval must have been preprocessed");
        let interval_bits = begin_bits.as_ref() & end_bits.as_ref();
        let bit = interval_bits
            .min()
            .expect("endpoint bitsets must share the interval's bit");
        self.id_map.insert(bit, id);
        // Only the interval's own bit joins the mask. Marking the whole
        // ancestor chain would let a never-inserted ancestor shadow an
        // inserted one in stab queries.
        self.update_id.insert(bit);
    }
}
