//! Regex syntax generation: escaping, fragments and the graph serializer.

/// Escaping of literals and rendering of character classes.
pub mod escape;
/// Tagged regex fragments and their textual rendering.
pub mod fragment;
/// Serialization of a minimized graph into a [`Fragment`].
pub mod serializer;

pub use escape::{escape, MIN_RANGE_LEN};
pub use fragment::Fragment;
pub use serializer::serialize;
