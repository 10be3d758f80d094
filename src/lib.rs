//! # MR-CFG - Maximal-Repeat Context-Free Grammars
//!
//! Builds the maximal-repeat context-free grammar (MR-CFG) of a byte string:
//! a straight-line grammar whose non-terminals correspond to the maximal
//! repeats of the text. Construction runs over a BWT-based text index and
//! processes the text's LCP-intervals shortest first.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix array, BWT, and wavelet tree behind the
//!   [`TextIndex`] facade
//! - [`lcp`] - LCP-interval enumeration in length-lexicographic order
//! - [`stab`] - Nested-interval stabbing structures (three interchangeable
//!   implementations)
//! - [`identifier`] - Repeat identifier assignment
//! - [`grammar`] - Grammar construction, factorization, and expansion
//! - [`timer`] - Wall-clock task timing for the CLI
//!
//! ## Quick Start
//!
//! ```
//! use mr_cfg::{build_cfg, Algorithm, TextIndex};
//!
//! let index = TextIndex::from_bytes(b"abracadabra").unwrap();
//! let cfg = build_cfg(&index, Algorithm::Fast);
//!
//! // The grammar expands back to the input
//! assert_eq!(cfg.expand(&index), b"abracadabra");
//! ```
//!
//! ## Construction pipeline
//!
//! The enumerator streams LCP-intervals in non-decreasing order of their
//! value. The builder assigns each interval an identifier keyed by the end
//! of the factor's first occurrence, and when an interval is maximal (more
//! than one distinct left extension) it factorizes the corresponding text
//! window against the already-registered rules. All three stabbing
//! structures produce the same grammar up to identifier assignment.

pub mod grammar;
pub mod identifier;
pub mod index;
pub mod lcp;
pub mod stab;
pub mod timer;

// Re-exports for the public API
pub use grammar::{build_cfg, Cfg, RuleId};
pub use index::{TextIndex, SENTINEL};
pub use lcp::{LcpInterval, LcpIntervals};
pub use stab::{Algorithm, FastStabber, NestedIntervalStabber, OnlineStabber, OptimalStabber};
