use std::fmt;

use log::trace;
use mark_last::MarkLastIterator;

use super::builder::Minimizer;
use super::node::NodeId;
use super::node_arena::NodeArena;
use super::trie::Trie;
use crate::cluster::{cluster_by_prefixlen, Cluster};
use crate::syntax::{serialize, Fragment};

/// A minimized, immutable graph over a set of strings.
///
/// Built from a [`Trie`] by compressing non-branching chains into
/// multi-character labels and sharing structurally identical subtrees. The
/// graph owns all of its nodes; use [`root`](Dawg::root) to walk it.
///
/// Building and serializing recurse once per nested end-of-string point, so a
/// set such as every prefix of one very long string can overflow the stack.
///
/// # Examples
///
/// ```
/// use regroup::Dawg;
///
/// let dawg = Dawg::from_strings(["tap", "taps", "top", "tops"]);
/// assert_eq!(dawg.serialize(), "t[ao]ps?");
/// assert!(dawg.contains("tops"));
/// assert!(!dawg.contains("to"));
/// ```
#[derive(Clone)]
pub struct Dawg {
    arena: NodeArena,
    root: NodeId,
}

impl Dawg {
    /// Builds the graph for a set of strings. Duplicates and order are irrelevant.
    pub fn from_strings<I>(strings: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Dawg::from_trie(&Trie::build(strings))
    }

    /// Minimizes an existing trie.
    pub fn from_trie(trie: &Trie) -> Self {
        let (arena, root) = Minimizer::new(trie).build();
        Dawg { arena, root }
    }

    /// Returns a view of the root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            arena: &self.arena,
            id: self.root,
        }
    }

    /// Returns a view of the node with the given id, if it belongs to this graph.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.arena.get(id).map(|_| NodeRef {
            arena: &self.arena,
            id,
        })
    }

    /// Returns the number of unique nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// True if the set holds no string at all (not even the empty one).
    pub fn is_empty(&self) -> bool {
        let root = self.root();
        !root.is_terminal() && root.edge_count() == 0
    }

    /// Returns true if `s` is a member of the set.
    pub fn contains(&self, s: &str) -> bool {
        let mut node = self.root();
        let mut rest = s;
        while let Some(ch) = rest.chars().next() {
            match node.get(ch) {
                Some((label, next)) if rest.starts_with(label) => {
                    rest = &rest[label.len()..];
                    node = next;
                }
                _ => return false,
            }
        }
        node.is_terminal()
    }

    /// Returns every string of the set in code-point order.
    pub fn strings(&self) -> Vec<String> {
        let mut strings = Vec::new();
        let mut prefix = String::new();
        collect_strings(self.root(), &mut prefix, &mut strings);
        strings
    }

    /// Returns the serialized form of the whole set as a tagged fragment.
    pub fn fragment(&self) -> Fragment {
        serialize(self.root())
    }

    /// Returns a regular expression matching exactly the strings of the set.
    ///
    /// The empty set (and the set holding only the empty string) give `""`.
    pub fn serialize(&self) -> String {
        let pattern = self.fragment().to_string();
        trace!(
            "serialized {} graph nodes into a pattern of {} bytes",
            self.node_count(),
            pattern.len()
        );
        pattern
    }

    /// Splits the set into clusters sharing their first `k` characters.
    ///
    /// See [`cluster_by_prefixlen`](crate::cluster::cluster_by_prefixlen).
    pub fn cluster_by_prefixlen(&self, k: usize) -> Vec<Cluster> {
        if self.is_empty() {
            return Vec::new();
        }
        cluster_by_prefixlen(self.root(), k)
    }
}

fn collect_strings(node: NodeRef<'_>, prefix: &mut String, strings: &mut Vec<String>) {
    if node.is_terminal() {
        strings.push(prefix.clone());
    }
    for (label, child) in node.edges() {
        let len = prefix.len();
        prefix.push_str(label);
        collect_strings(child, prefix, strings);
        prefix.truncate(len);
    }
}

impl Default for Dawg {
    fn default() -> Self {
        Dawg::from_trie(&Trie::new())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dawg {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Dawg::from_strings(iter)
    }
}

/// Prints the nested label structure, `$` marking where a string ends.
///
/// `["12", "134"]` prints as `{"1": {"2": $, "34": $}}`.
impl fmt::Debug for Dawg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_shape(f, self.root())
    }
}

fn write_shape(f: &mut fmt::Formatter<'_>, node: NodeRef<'_>) -> fmt::Result {
    if node.is_empty_leaf() {
        return f.write_str("$");
    }
    f.write_str("{")?;
    if node.is_terminal() {
        f.write_str("$, ")?;
    }
    for (last, (label, child)) in node.edges().mark_last() {
        write!(f, "{label:?}: ")?;
        write_shape(f, child)?;
        if !last {
            f.write_str(", ")?;
        }
    }
    f.write_str("}")
}

/// A read-only view of one node of a [`Dawg`].
#[derive(Clone, Copy)]
pub struct NodeRef<'d> {
    arena: &'d NodeArena,
    id: NodeId,
}

impl<'d> NodeRef<'d> {
    /// The id of this node. Equal ids mean shared (structurally identical) subtrees.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// True if a string of the set ends at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.arena[self.id].is_terminal()
    }

    /// True for the canonical leaf that represents "nothing remains".
    #[inline]
    pub fn is_empty_leaf(&self) -> bool {
        self.arena[self.id].is_empty_leaf()
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.arena[self.id].edges().len()
    }

    /// Returns the outgoing edges as `(label, target)` pairs in label order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (&'d str, NodeRef<'d>)> + 'd {
        let arena = self.arena;
        arena[self.id]
            .edges()
            .iter()
            .map(move |(label, id)| (label.as_str(), NodeRef { arena, id: *id }))
    }

    /// Returns the edge whose label starts with `ch`, if any.
    pub fn get(&self, ch: char) -> Option<(&'d str, NodeRef<'d>)> {
        let arena = self.arena;
        arena[self.id]
            .get(ch)
            .map(|(label, id)| (label, NodeRef { arena, id }))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.arena, other.arena)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_shape(f, *self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic_lookup() {
        let dawg = Dawg::from_strings(["BAKE", "CAKE", "FAKE", "LAKE"]);
        assert!(dawg.contains("BAKE"));
        assert!(dawg.contains("LAKE"));
        assert!(!dawg.contains("MAKE"));
        assert!(!dawg.contains("AKE"));
        assert!(!dawg.contains("BAK"));
        assert!(!dawg.contains("BAKES"));
        assert!(!dawg.contains(""));
    }

    #[test]
    fn contains_walks_multi_char_labels() {
        let dawg = Dawg::from_strings(["abcdef", "abcxyz"]);
        assert!(dawg.contains("abcdef"));
        assert!(dawg.contains("abcxyz"));
        assert!(!dawg.contains("abcd"));
        assert!(!dawg.contains("abcdeX"));
        assert!(!dawg.contains("abcdefg"));
    }

    #[test]
    fn empty_set() {
        let dawg = Dawg::from_strings(Vec::<String>::new());
        assert!(dawg.is_empty());
        assert!(!dawg.contains(""));
        assert_eq!(dawg.serialize(), "");
        assert!(dawg.strings().is_empty());
        assert!(dawg.cluster_by_prefixlen(2).is_empty());
        assert_eq!(format!("{dawg:?}"), "{}");
    }

    #[test]
    fn only_the_empty_string() {
        let dawg = Dawg::from_strings([""]);
        assert!(!dawg.is_empty());
        assert!(dawg.contains(""));
        assert_eq!(dawg.serialize(), "");
        assert_eq!(dawg.strings(), [""]);
        assert_eq!(format!("{dawg:?}"), "$");
    }

    #[test]
    fn strings_round_trip_sorted() {
        let words = ["tops", "tap", "top", "taps", "tap"];
        let dawg: Dawg = words.iter().collect();
        assert_eq!(dawg.strings(), ["tap", "taps", "top", "tops"]);
    }

    #[test]
    fn flatten_shared_suffix() {
        let dawg = Dawg::from_strings(["ab", "cb"]);
        assert_eq!(dawg.strings(), ["ab", "cb"]);
    }

    #[test]
    fn debug_prints_compressed_shape() {
        assert_eq!(format!("{:?}", Dawg::from_strings(["23"])), r#"{"23": $}"#);
        assert_eq!(format!("{:?}", Dawg::from_strings(["123"])), r#"{"123": $}"#);
        assert_eq!(
            format!("{:?}", Dawg::from_strings(["123", "124"])),
            r#"{"12": {"3": $, "4": $}}"#
        );
        assert_eq!(
            format!("{:?}", Dawg::from_strings(["12", "134"])),
            r#"{"1": {"2": $, "34": $}}"#
        );
        assert_eq!(
            format!("{:?}", Dawg::from_strings(["joe", "joey"])),
            r#"{"joe": {$, "y": $}}"#
        );
    }

    #[test]
    fn node_views_expose_sharing() {
        let dawg = Dawg::from_strings(["100", "200"]);
        let root = dawg.root();
        let (one, after_one) = root.get('1').unwrap();
        let (two, after_two) = root.get('2').unwrap();
        assert_eq!(one, "100");
        assert_eq!(two, "200");
        assert_eq!(after_one, after_two);
        assert!(after_one.is_empty_leaf());
        assert_eq!(root.edges().len(), 2);
        assert_eq!(dawg.node(after_one.id()), Some(after_one));
        assert_eq!(dawg.node_count(), 2);
    }

    #[test]
    fn every_prefix_of_a_long_string() {
        let word = "ab".repeat(100);
        let prefixes: Vec<&str> = (1..=word.len()).map(|end| &word[..end]).collect();
        let dawg = Dawg::from_strings(&prefixes);
        assert_eq!(dawg.node_count(), word.len() + 1);
        assert!(prefixes.iter().all(|p| dawg.contains(p)));
        assert!(!dawg.contains(""));
        let pattern = dawg.serialize();
        assert!(pattern.starts_with("a(b(a(b"));
        assert!(pattern.ends_with("b?)?)?"));
    }

    #[test]
    fn dawg_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dawg>();
    }
}
