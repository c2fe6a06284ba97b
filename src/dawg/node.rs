use smallvec::SmallVec;

/// Index of a node inside the arena of a [`Dawg`](super::owned::Dawg).
///
/// Two ids of the same DAG are equal exactly when they denote structurally
/// identical subtrees, since every node is canonicalized before it is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The outgoing edges of a node: `(label, target)` pairs sorted by label.
///
/// Most nodes have one or two edges, so those are stored inline.
pub(crate) type Edges = SmallVec<[(String, NodeId); 2]>;

/// A node in the minimized graph.
///
/// The derived `Hash` and `Eq` only look one level down: the terminal flag,
/// the labels and the ids of the children. Nodes are canonicalized bottom-up,
/// so equal child ids already imply equal subtrees and the derived impls act
/// as the structural fingerprint of the whole subtree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DagNode {
    terminal: bool,
    edges: Edges,
}

impl DagNode {
    /// Creates a node without edges.
    ///
    /// # Arguments
    ///
    /// * `terminal` - Whether a string of the set ends at this node
    #[cfg(test)]
    pub fn new(terminal: bool) -> Self {
        DagNode {
            terminal,
            edges: Edges::new(),
        }
    }

    /// Creates a node from already sorted edges.
    pub fn with_edges(terminal: bool, edges: Edges) -> Self {
        debug_assert!(edges.iter().all(|(label, _)| !label.is_empty()));
        debug_assert!(
            edges.windows(2).all(|w| first_char(&w[0].0) < first_char(&w[1].0)),
            "edges must be sorted and must not share a first character"
        );
        DagNode { terminal, edges }
    }

    /// True if a string of the set ends at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True for the canonical leaf that represents "nothing remains".
    #[inline]
    pub fn is_empty_leaf(&self) -> bool {
        self.terminal && self.edges.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[(String, NodeId)] {
        &self.edges
    }

    /// Returns the edge whose label starts with `ch`, if any.
    pub fn get(&self, ch: char) -> Option<(&str, NodeId)> {
        self.edges
            .iter()
            .find(|(label, _)| first_char(label) == Some(ch))
            .map(|(label, target)| (label.as_str(), *target))
    }
}

#[inline]
fn first_char(label: &str) -> Option<char> {
    label.chars().next()
}
