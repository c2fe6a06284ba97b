/// Minimization of a trie into a graph with shared subtrees.
pub(crate) mod builder;
/// Graph node and node id types.
pub mod node;
/// Internal index arena owning the graph nodes.
pub(crate) mod node_arena;
/// The owned, minimized graph and its read-only node views.
pub mod owned;
/// Insert-only prefix tree, the input of minimization.
pub mod trie;

pub use node::NodeId;
pub use owned::{Dawg, NodeRef};
pub use trie::Trie;
