use smallvec::{smallvec, SmallVec};

use super::fragment::Fragment;
use crate::dawg::NodeRef;

/// Edges of one node that lead to the same target.
struct Group<'d> {
    target: NodeRef<'d>,
    labels: SmallVec<[&'d str; 4]>,
}

/// A branch together with the character it starts with, used for ordering.
struct Branch {
    key: char,
    fragment: Fragment,
}

/// Serializes the subgraph below `node` into regex syntax.
///
/// Edges sharing a target are merged: their common literal suffix is factored
/// out and the single-character remainders form a character class. A node
/// that ends a string makes its alternatives optional, preferably by marking
/// one single-atom branch with `?`, otherwise by marking the whole group.
///
/// Edges of `node` itself that end the string together become plain branches
/// of the result. Deeper down such a group stays a nested alternation.
///
/// ```
/// use regroup::{serialize, Dawg};
///
/// let dawg = Dawg::from_strings(["abcdef", "def"]);
/// assert_eq!(serialize(dawg.root()).to_string(), "(abc)?def");
///
/// let dawg = Dawg::from_strings(["1Black", "1Blue", "1Green", "1Red"]);
/// assert_eq!(serialize(dawg.root()).to_string(), "1(Bl(ack|ue)|(Green|Red))");
/// let (_, one) = dawg.root().get('1').unwrap();
/// assert_eq!(serialize(one).to_string(), "(Bl(ack|ue)|Green|Red)");
/// ```
pub fn serialize(node: NodeRef<'_>) -> Fragment {
    serialize_node(node, true)
}

fn serialize_node(node: NodeRef<'_>, top: bool) -> Fragment {
    if node.edge_count() == 0 {
        return Fragment::Empty;
    }

    let mut branches: Vec<Branch> = Vec::with_capacity(node.edge_count());
    for group in group_by_target(node) {
        let key = first_char(group.labels[0]);
        if let [label] = group.labels.as_slice() {
            branches.push(Branch {
                key,
                fragment: Fragment::concat([
                    Fragment::literal(label),
                    serialize_node(group.target, false),
                ]),
            });
            continue;
        }

        let suffix = common_suffix(&group.labels);
        let (stems, has_empty) =
            alternatives(group.labels.iter().map(|label| &label[..label.len() - suffix.len()]));
        if top && suffix.is_empty() && group.target.is_empty_leaf() {
            // Nothing follows the stems, so they are plain alternatives of this node.
            debug_assert!(!has_empty);
            branches.extend(stems);
        } else {
            let stems = stems.into_iter().map(|branch| branch.fragment).collect();
            branches.push(Branch {
                key,
                fragment: Fragment::concat([
                    collapse(stems, has_empty),
                    Fragment::literal(suffix),
                    serialize_node(group.target, false),
                ]),
            });
        }
    }

    branches.sort_by_key(|branch| branch.key);
    collapse(
        branches.into_iter().map(|branch| branch.fragment).collect(),
        node.is_terminal(),
    )
}

/// Groups the edges of `node` by target, in the order of each group's first edge.
fn group_by_target<'d>(node: NodeRef<'d>) -> SmallVec<[Group<'d>; 4]> {
    let mut groups: SmallVec<[Group<'d>; 4]> = SmallVec::new();
    for (label, target) in node.edges() {
        match groups.iter_mut().find(|group| group.target == target) {
            Some(group) => group.labels.push(label),
            None => groups.push(Group {
                target,
                labels: smallvec![label],
            }),
        }
    }
    groups
}

/// Longest common suffix of all `labels`.
fn common_suffix<'a>(labels: &[&'a str]) -> &'a str {
    let Some((&first, rest)) = labels.split_first() else {
        return "";
    };
    let mut len = first.len();
    for label in rest {
        len = first[first.len() - len..]
            .chars()
            .rev()
            .zip(label.chars().rev())
            .take_while(|(a, b)| a == b)
            .map(|(ch, _)| ch.len_utf8())
            .sum();
    }
    &first[first.len() - len..]
}

/// Turns the stems of one group into sorted branches.
///
/// Single-character stems are merged into one character class. Returns the
/// branches and whether one of the stems was empty.
fn alternatives<'a>(stems: impl Iterator<Item = &'a str>) -> (Vec<Branch>, bool) {
    let mut singles: SmallVec<[char; 8]> = SmallVec::new();
    let mut branches = Vec::new();
    let mut has_empty = false;
    for stem in stems {
        let mut chars = stem.chars();
        match (chars.next(), chars.next()) {
            (None, _) => has_empty = true,
            (Some(ch), None) => singles.push(ch),
            (Some(ch), Some(_)) => branches.push(Branch {
                key: ch,
                fragment: Fragment::literal(stem),
            }),
        }
    }
    if let Some(&key) = singles.iter().min() {
        branches.push(Branch {
            key,
            fragment: Fragment::class(singles),
        });
    }
    branches.sort_by_key(|branch| branch.key);
    (branches, has_empty)
}

/// Joins branches into one fragment, making it optional if `has_empty`.
///
/// With several branches, the empty alternative is folded into the first
/// branch that is a single atom (`(ab|c)?` becomes `(ab|c?)`). Only when there
/// is no such branch does the whole group get the `?`.
fn collapse(mut branches: Vec<Fragment>, has_empty: bool) -> Fragment {
    if !has_empty || branches.is_empty() {
        return Fragment::alternation(branches);
    }
    if branches.len() == 1 {
        return Fragment::alternation(branches).optional();
    }
    match branches.iter().position(Fragment::is_atom) {
        Some(pos) => {
            let atom = std::mem::replace(&mut branches[pos], Fragment::Empty);
            branches[pos] = atom.optional();
            Fragment::alternation(branches)
        }
        None => Fragment::alternation(branches).optional(),
    }
}

#[inline]
fn first_char(label: &str) -> char {
    label.chars().next().unwrap_or_default()
}
