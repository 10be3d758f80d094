//! Stabbing queries over nested intervals.
//!
//! The grammar builder registers the suffix-array interval of every emitted
//! rule and asks, for a given suffix-array row, which already-registered rule
//! covers it most tightly. Registered intervals form a laminar family (any
//! two are disjoint or strictly nested) and arrive ancestors first, which the
//! implementations exploit.
//!
//! Three interchangeable implementations:
//!
//! - [`OnlineStabber`] - ordered map over interval boundaries
//! - [`OptimalStabber`] - preprocessed bitset identifiers with rank/select
//! - [`FastStabber`] - dynamic compressed bitmap of boundaries

pub mod fast;
pub mod online;
pub mod optimal;

pub use self::fast::FastStabber;
pub use self::online::OnlineStabber;
pub use self::optimal::OptimalStabber;

use crate::grammar::RuleId;

/// Stabbing queries and insertion for a family of pairwise-nested intervals
/// over `[0..n)`. Positions are inclusive on both ends.
pub trait NestedIntervalStabber {
    /// The identifier of the deepest inserted interval containing `i`, if any.
    fn stab(&self, i: u64) -> Option<RuleId>;

    /// Insert interval `[begin, end]` under `id`. The interval must be
    /// disjoint from or strictly nested inside every interval inserted
    /// before it.
    fn update(&mut self, begin: u64, end: u64, id: RuleId);
}

/// Which stabbing structure backs grammar construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Preprocessed bitset identifiers; requires a pass over all
    /// LCP-intervals up front
    Optimal,
    /// Ordered-map boundaries; no preprocessing
    Online,
    /// Dynamic compressed bitmap; no preprocessing
    Fast,
}
