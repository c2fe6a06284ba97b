use hashbrown::HashMap;
use log::debug;

use super::node::{DagNode, Edges, NodeId};
use super::node_arena::NodeArena;
use super::trie::{Trie, ROOT};

/// Turns a [`Trie`] into a minimized graph.
///
/// Walks the trie in post-order. On the way down, runs of nodes that neither
/// branch nor end a string are folded into multi-character edge labels. On the
/// way up, every finished node is looked up in a register of canonical nodes
/// and replaced by an existing equal node if there is one, so identical
/// subtrees end up stored once.
pub(crate) struct Minimizer<'t> {
    trie: &'t Trie,
    arena: NodeArena,
    register: HashMap<DagNode, NodeId>,
}

impl<'t> Minimizer<'t> {
    pub(crate) fn new(trie: &'t Trie) -> Self {
        Minimizer {
            trie,
            arena: NodeArena::new(),
            register: HashMap::default(),
        }
    }

    /// Minimizes the whole trie and returns the arena together with the root id.
    pub(crate) fn build(mut self) -> (NodeArena, NodeId) {
        let root = self.minimize(ROOT);
        debug!(
            "minimized {} trie nodes into {} graph nodes",
            self.trie.node_count(),
            self.arena.len()
        );
        (self.arena, root)
    }

    fn minimize(&mut self, index: usize) -> NodeId {
        let trie = self.trie;
        let node = trie.node(index);
        let edges: Edges = node
            .children
            .iter()
            .map(|&(ch, child)| {
                let (label, end) = self.compress_chain(ch, child);
                (label, self.minimize(end))
            })
            .collect();
        self.canonicalize(DagNode::with_edges(node.terminal, edges))
    }

    /// Follows the edge `first` to `child` for as long as the chain neither
    /// branches nor ends a string. Returns the collected label and the node
    /// where the chain stops.
    fn compress_chain(&self, first: char, child: usize) -> (String, usize) {
        let mut label = String::from(first);
        let mut end = child;
        while let Some((ch, next)) = self.trie.node(end).chain_child() {
            label.push(ch);
            end = next;
        }
        (label, end)
    }

    fn canonicalize(&mut self, node: DagNode) -> NodeId {
        debug_assert!(
            node.edges()
                .iter()
                .all(|&(_, child)| self.arena.get(child).is_some()),
            "Cannot canonicalize unless all children are canonical"
        );
        let arena = &mut self.arena;
        *self
            .register
            .entry(node)
            .or_insert_with_key(|node| arena.alloc(node.clone()))
    }
}
