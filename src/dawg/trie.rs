use smallvec::SmallVec;

/// Index of the root node in [`Trie::nodes`].
pub(crate) const ROOT: usize = 0;

#[derive(Clone, Debug, Default)]
pub(crate) struct TrieNode {
    pub(crate) terminal: bool,
    /// `(char, child index)` pairs kept sorted by char.
    pub(crate) children: SmallVec<[(char, usize); 4]>,
}

impl TrieNode {
    /// Returns the only child if this node neither ends a string nor branches.
    #[inline]
    pub(crate) fn chain_child(&self) -> Option<(char, usize)> {
        match self.children.as_slice() {
            [only] if !self.terminal => Some(*only),
            _ => None,
        }
    }
}

/// An insert-only prefix tree over a set of strings.
///
/// The trie is the first stage of building a [`Dawg`](super::owned::Dawg):
/// it holds one edge per character and is minimized afterwards. Children are
/// kept sorted, so the shape of the trie never depends on insertion order.
///
/// # Examples
///
/// ```
/// use regroup::Trie;
///
/// let trie: Trie = ["tap", "taps", "top"].into_iter().collect();
/// assert!(trie.contains("taps"));
/// assert!(!trie.contains("ta"));
/// ```
#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    /// Creates a trie holding no strings.
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Builds a trie from any sequence of strings. Duplicates are absorbed.
    pub fn build<I>(strings: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut trie = Trie::new();
        for s in strings {
            trie.insert(s.as_ref());
        }
        trie
    }

    /// Inserts a string.
    ///
    /// Returns `true` if the string was added, `false` if it was already present.
    pub fn insert(&mut self, s: &str) -> bool {
        let node = s
            .chars()
            .fold(ROOT, |node, ch| self.child_or_insert(node, ch));
        let added = !self.nodes[node].terminal;
        self.nodes[node].terminal = true;
        added
    }

    fn child_or_insert(&mut self, node: usize, ch: char) -> usize {
        match self.nodes[node]
            .children
            .binary_search_by_key(&ch, |&(c, _)| c)
        {
            Ok(pos) => self.nodes[node].children[pos].1,
            Err(pos) => {
                let child = self.nodes.len();
                self.nodes.push(TrieNode::default());
                self.nodes[node].children.insert(pos, (ch, child));
                child
            }
        }
    }

    /// Returns true if `s` was inserted.
    pub fn contains(&self, s: &str) -> bool {
        s.chars()
            .try_fold(ROOT, |node, ch| self.child(node, ch))
            .is_some_and(|node| self.nodes[node].terminal)
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        let children = &self.nodes[node].children;
        children
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|pos| children[pos].1)
    }

    /// Returns true if no string (not even the empty one) was inserted.
    pub fn is_empty(&self) -> bool {
        let root = &self.nodes[ROOT];
        !root.terminal && root.children.is_empty()
    }

    /// Returns the number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn node(&self, index: usize) -> &TrieNode {
        &self.nodes[index]
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Trie::build(iter)
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for s in iter {
            self.insert(s.as_ref());
        }
    }
}
