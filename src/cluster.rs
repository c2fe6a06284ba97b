//! Grouping of a minimized set by fixed-length prefixes.

use std::fmt;

use log::trace;

use crate::dawg::NodeRef;
use crate::syntax::{escape, serialize, Fragment};

/// One bucket of strings sharing the same prefix.
///
/// `prefix` is already escaped, so `prefix + pattern` (or the `Display` impl)
/// is a regular expression matching exactly the strings of the bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    /// The shared prefix, escaped as a regex literal.
    pub prefix: String,
    /// Pattern for the rest of the strings after `prefix`.
    pub pattern: String,
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.pattern)
    }
}

/// Splits the strings below `root` into clusters by their first `k` characters.
///
/// Every maximal prefix of length `k` yields one cluster whose pattern covers
/// all continuations of that prefix. Strings shorter than `k` become clusters
/// of their own with an empty pattern, so nothing is dropped or truncated.
/// Clusters come out in code-point order of their prefixes.
///
/// ```
/// use regroup::Dawg;
///
/// let dawg = Dawg::from_strings(["EFgreen", "EFgrey", "EntireS1", "EntireS2"]);
/// let clusters: Vec<String> = dawg
///     .cluster_by_prefixlen(2)
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(clusters, ["EFgre(en|y)", "EntireS[12]"]);
/// ```
pub fn cluster_by_prefixlen(root: NodeRef<'_>, k: usize) -> Vec<Cluster> {
    let mut walk = PrefixWalk {
        k,
        prefix: String::new(),
        depth: 0,
        clusters: Vec::new(),
    };
    if k == 0 {
        walk.emit("", serialize(root));
    } else {
        walk.visit(root);
    }
    trace!("split into {} clusters by prefixes of length {k}", walk.clusters.len());
    walk.clusters
}

struct PrefixWalk {
    k: usize,
    /// Unescaped characters consumed so far.
    prefix: String,
    /// Number of chars in `prefix`.
    depth: usize,
    clusters: Vec<Cluster>,
}

impl PrefixWalk {
    /// Visits a node reached with fewer than `k` characters consumed.
    fn visit(&mut self, node: NodeRef<'_>) {
        debug_assert!(self.depth < self.k);
        if node.is_terminal() {
            let whole = self.prefix.clone();
            self.emit(&whole, Fragment::Empty);
        }
        for (label, target) in node.edges() {
            let needed = self.k - self.depth;
            match label.char_indices().nth(needed) {
                Some((split, _)) => self.emit_split(label, split, target),
                None if label.chars().count() == needed => {
                    self.emit_split(label, label.len(), target)
                }
                None => {
                    let len = self.prefix.len();
                    let consumed = label.chars().count();
                    self.prefix.push_str(label);
                    self.depth += consumed;
                    self.visit(target);
                    self.prefix.truncate(len);
                    self.depth -= consumed;
                }
            }
        }
    }

    /// Emits the cluster for the prefix that ends inside (or right at the end
    /// of) `label`, at byte offset `split`.
    fn emit_split(&mut self, label: &str, split: usize, target: NodeRef<'_>) {
        let (head, tail) = label.split_at(split);
        let prefix = format!("{}{head}", self.prefix);
        let rest = Fragment::concat([Fragment::literal(tail), serialize(target)]);
        self.emit(&prefix, rest);
    }

    fn emit(&mut self, prefix: &str, rest: Fragment) {
        self.clusters.push(Cluster {
            prefix: escape(prefix),
            pattern: rest.to_string(),
        });
    }
}
