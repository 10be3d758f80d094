//! Grammar construction from the LCP-interval stream.
//!
//! Consumes the intervals shortest-first, assigns each repeat an identifier,
//! and for every maximal interval synthesizes a production by rewriting the
//! corresponding text factor left to right against the stabber. Each new
//! rule's suffix-array interval is then registered, so longer repeats found
//! later factorize through it.

use std::io::{self, Write};

use ahash::AHashMap;

use crate::identifier::RepeatIds;
use crate::index::TextIndex;
use crate::lcp::LcpIntervals;
use crate::stab::{Algorithm, FastStabber, NestedIntervalStabber, OnlineStabber, OptimalStabber};

/// Grammar symbol: identifiers below sigma are terminals (compacted
/// characters), identifiers at or above sigma are rules.
pub type RuleId = u64;

/// A straight-line context-free grammar over an indexed text.
///
/// Holds one production per non-terminal plus the implicit terminal rules
/// `k -> comp2char(k)`. Immutable once built.
pub struct Cfg {
    rules: AHashMap<RuleId, Vec<RuleId>>,
    sizes: AHashMap<RuleId, u64>,
    start: RuleId,
    sigma: u64,
}

impl Cfg {
    pub fn start(&self) -> RuleId {
        self.start
    }

    pub fn sigma(&self) -> u64 {
        self.sigma
    }

    /// The production of a non-terminal, if the grammar holds one.
    pub fn production(&self, id: RuleId) -> Option<&[RuleId]> {
        self.rules.get(&id).map(Vec::as_slice)
    }

    /// All non-terminal rules in arbitrary order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &[RuleId])> {
        self.rules.iter().map(|(&id, prod)| (id, prod.as_slice()))
    }

    /// Length of the string a symbol derives; 1 for terminals.
    pub fn size(&self, id: RuleId) -> Option<u64> {
        self.sizes.get(&id).copied()
    }

    /// Number of rules, terminals included.
    pub fn rule_count(&self) -> u64 {
        self.rules.len() as u64 + self.sigma
    }

    /// Length of the start rule's production.
    pub fn start_len(&self) -> u64 {
        self.rules[&self.start].len() as u64
    }

    /// Total grammar size: one entry per terminal plus every production
    /// symbol.
    pub fn total_size(&self) -> u64 {
        self.sigma + self.rules.values().map(|p| p.len() as u64).sum::<u64>()
    }

    /// Grammar size excluding the start production.
    pub fn non_start_size(&self) -> u64 {
        self.total_size() - self.start_len()
    }

    /// Expand the grammar from the start rule, writing the derived bytes and
    /// suppressing the sentinel terminal.
    pub fn expand_into<W: Write>(&self, index: &TextIndex, out: &mut W) -> io::Result<()> {
        let mut stack = vec![self.start];
        while let Some(id) = stack.pop() {
            if id < self.sigma {
                if id > 0 {
                    out.write_all(&[index.comp2char(id)])?;
                }
            } else {
                let production = &self.rules[&id];
                for &symbol in production.iter().rev() {
                    stack.push(symbol);
                }
            }
        }
        Ok(())
    }

    /// Expansion into a fresh buffer; equals the indexed text without its
    /// sentinel.
    pub fn expand(&self, index: &TextIndex) -> Vec<u8> {
        let mut out = Vec::new();
        self.expand_into(index, &mut out)
            .expect("writing to a Vec cannot fail");
        out
    }
}

/// Build the grammar for an indexed text with the chosen stabbing structure.
pub fn build_cfg(index: &TextIndex, algorithm: Algorithm) -> Cfg {
    match algorithm {
        Algorithm::Optimal => build_with(index, OptimalStabber::new(index)),
        Algorithm::Online => build_with(index, OnlineStabber::new()),
        Algorithm::Fast => build_with(index, FastStabber::new()),
    }
}

/// The construction loop, generic over the stabbing structure.
fn build_with<S: NestedIntervalStabber>(index: &TextIndex, mut stabber: S) -> Cfg {
    let sigma = index.sigma();

    let mut rules: AHashMap<RuleId, Vec<RuleId>> = AHashMap::new();
    let mut sizes: AHashMap<RuleId, u64> = AHashMap::new();
    for terminal in 0..sigma {
        sizes.insert(terminal, 1);
    }

    let mut ids = RepeatIds::new(index);

    let mut intervals = LcpIntervals::new(index);
    let _ = intervals.next(); // whole-text interval at lcp 0

    for record in intervals {
        let id = ids.get(record.lcp, record.begin);
        // One bump per value along the interval's left-extension chain, so
        // the entry reaches the factor length by the time the repeat turns
        // maximal.
        *sizes.entry(id).or_insert(0) += 1;

        if record.left_extensions > 1 {
            let i = index.sa(record.begin);
            let j = i + sizes[&id];
            let production = factorize(index, &stabber, &sizes, i, j);
            if production.len() > 1 {
                rules.insert(id, production);
                stabber.update(record.begin, record.end, id);
            } else {
                // A single-symbol rule is useless
                rules.remove(&id);
                sizes.remove(&id);
            }
            ids.remove(record.lcp, record.begin);
        }
    }

    let start = ids.next_id();
    let production = factorize(index, &stabber, &sizes, 0, index.n());
    rules.insert(start, production);
    sizes.insert(start, index.n());

    Cfg {
        rules,
        sizes,
        start,
        sigma,
    }
}

/// Rewrite the text window `[i, j)` as a sequence of terminals and existing
/// rules, greedily taking the deepest registered rule at each position.
///
/// Greedy-longest is exact: rules register in order of increasing length, so
/// the deepest stab is the longest rule currently derivable at the position.
fn factorize<S: NestedIntervalStabber>(
    index: &TextIndex,
    stabber: &S,
    sizes: &AHashMap<RuleId, u64>,
    mut i: u64,
    j: u64,
) -> Vec<RuleId> {
    let mut production = Vec::new();
    while i < j {
        let row = index.isa(i);
        match stabber.stab(row) {
            None => {
                production.push(index.char2comp(index.text(i)));
                i += 1;
            }
            Some(rule) => {
                let len = sizes[&rule];
                debug_assert!(i + len <= j, "stabbed rule overshoots the window");
                production.push(rule);
                i += len;
            }
        }
    }
    production
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGORITHMS: [Algorithm; 3] = [Algorithm::Optimal, Algorithm::Online, Algorithm::Fast];

    #[test]
    fn test_single_character() {
        let index = TextIndex::from_bytes(b"a").unwrap();
        for algorithm in ALGORITHMS {
            let cfg = build_cfg(&index, algorithm);
            // Terminals plus the start rule only
            assert_eq!(cfg.rule_count(), 3);
            assert_eq!(cfg.start_len(), 2);
            assert_eq!(cfg.expand(&index), b"a");
        }
    }

    #[test]
    fn test_abab_creates_repeat_rule() {
        let index = TextIndex::from_bytes(b"abab").unwrap();
        for algorithm in ALGORITHMS {
            let cfg = build_cfg(&index, algorithm);
            assert_eq!(cfg.expand(&index), b"abab");
            // One rule for "ab" besides the start rule
            assert_eq!(cfg.rule_count(), 3 + 2);
            let repeat = cfg
                .rules()
                .find(|&(id, _)| id != cfg.start())
                .map(|(id, _)| id)
                .unwrap();
            assert_eq!(cfg.size(repeat), Some(2));
            assert_eq!(cfg.production(repeat).unwrap().len(), 2);
            // Start derives the repeat twice plus the sentinel
            assert_eq!(cfg.production(cfg.start()).unwrap(), &[repeat, repeat, 0]);
        }
    }

    #[test]
    fn test_sizes_match_productions() {
        let index = TextIndex::from_bytes(b"abracadabra").unwrap();
        for algorithm in ALGORITHMS {
            let cfg = build_cfg(&index, algorithm);
            for (id, production) in cfg.rules() {
                let derived: u64 = production
                    .iter()
                    .map(|&symbol| cfg.size(symbol).unwrap())
                    .sum();
                assert_eq!(cfg.size(id), Some(derived), "rule {}", id);
            }
            assert_eq!(cfg.size(cfg.start()), Some(index.n()));
        }
    }

    #[test]
    fn test_no_single_symbol_rules() {
        let index = TextIndex::from_bytes(b"mississippi").unwrap();
        for algorithm in ALGORITHMS {
            let cfg = build_cfg(&index, algorithm);
            for (id, production) in cfg.rules() {
                assert!(
                    production.len() >= 2,
                    "rule {} has a trivial production",
                    id
                );
            }
        }
    }

    #[test]
    fn test_expand_into_writer() {
        let index = TextIndex::from_bytes(b"mississippi").unwrap();
        let cfg = build_cfg(&index, Algorithm::Online);
        let mut out = Vec::new();
        cfg.expand_into(&index, &mut out).unwrap();
        assert_eq!(out, b"mississippi");
    }
}
