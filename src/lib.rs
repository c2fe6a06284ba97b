//! # regroup
//!
//! Turns a finite set of strings into a single, compact regular expression
//! that matches exactly that set.
//!
//! The strings are first inserted into a trie, which is then minimized into a
//! directed acyclic word graph: non-branching runs are folded into
//! multi-character edges and structurally identical subtrees are stored once.
//! Serializing the graph favors shared prefixes and suffixes, character classes
//! and optional parts over a flat alternation.
//!
//! ## Quick Start
//!
//! ```
//! assert_eq!(regroup::pattern(["tap", "taps", "top", "tops"]), "t[ao]ps?");
//! assert_eq!(regroup::pattern(["100", "200"]), "[12]00");
//! assert_eq!(regroup::pattern(["0", "0."]), r"0\.?");
//! ```
//!
//! For repeated queries, keep the graph around:
//!
//! ```
//! use regroup::Dawg;
//!
//! let dawg = Dawg::from_strings(["EFgreen", "EFgrey", "EntireS1", "EntireS2"]);
//! assert_eq!(dawg.serialize(), "E(Fgre(en|y)|ntireS[12])");
//!
//! let clusters: Vec<String> = dawg
//!     .cluster_by_prefixlen(2)
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(clusters, ["EFgre(en|y)", "EntireS[12]"]);
//! ```
//!
//! ## Limitations
//!
//! The minimization is greedy and deterministic, not globally minimal. Only
//! subtrees with the same shape are shared, so `["bat", "brat", "cat"]` gives
//! `(br?at|cat)` rather than `(br?|c)at`.

#![warn(missing_docs)]

/// Prefix clustering of a minimized set.
pub mod cluster;
/// Trie construction and minimization into a shared-subtree graph.
pub mod dawg;
/// Regex syntax generation from a minimized graph.
pub mod syntax;

pub use cluster::Cluster;
pub use dawg::{Dawg, NodeId, NodeRef, Trie};
pub use syntax::{serialize, Fragment};

/// Returns a regular expression matching exactly the given strings.
///
/// Order and duplicates of the input do not matter. An empty input gives the
/// empty pattern.
///
/// ```
/// assert_eq!(regroup::pattern(["", "aa", "bb"]), "(aa|bb)?");
/// assert_eq!(regroup::pattern(["abcdef", "def"]), "(abc)?def");
/// assert_eq!(regroup::pattern(Vec::<String>::new()), "");
/// ```
pub fn pattern<I>(strings: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Dawg::from_strings(strings).serialize()
}
