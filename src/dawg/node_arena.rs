//! A simple index arena for DAG nodes.
//!
//! Nodes are appended once and never moved or mutated afterwards, so a
//! [`NodeId`] stays valid for the lifetime of the arena. Parents refer to
//! their children by id; the arena is the sole owner of every node.

use std::ops::Index;

use super::node::{DagNode, NodeId};

/// An append-only arena that owns every node of a DAG.
#[derive(Clone, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<DagNode>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Moves a node into the arena and returns its id.
    pub fn alloc(&mut self, node: DagNode) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the node with the given id, or `None` if it was never allocated here.
    pub fn get(&self, id: NodeId) -> Option<&DagNode> {
        self.nodes.get(id.index())
    }

    /// Returns the number of nodes allocated in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl Index<NodeId> for NodeArena {
    type Output = DagNode;

    #[inline]
    fn index(&self, id: NodeId) -> &DagNode {
        &self.nodes[id.index()]
    }
}
