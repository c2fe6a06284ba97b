use std::fmt::{self, Write};

use mark_last::MarkLastIterator;

use super::escape;

/// A piece of regex syntax produced while serializing a graph.
///
/// Keeping the shape around instead of a plain string means the decision
/// whether a fragment needs parentheses before it can be quantified is a
/// tag check. Use the `Display` impl to get the regex text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Matches the empty string.
    Empty,
    /// A unit that can be quantified as is: one (escaped) character or one
    /// bracket expression.
    Atom(String),
    /// Fragments matched one after the other.
    Concat(Vec<Fragment>),
    /// Two or more alternatives. Always rendered inside parentheses.
    Alternation(Vec<Fragment>),
    /// A fragment that may be skipped.
    Optional(Box<Fragment>),
}

impl Fragment {
    /// A literal string, one escaped atom per character.
    pub fn literal(text: &str) -> Fragment {
        Fragment::concat(text.chars().map(|ch| {
            let mut atom = String::with_capacity(2);
            escape::push_literal(&mut atom, ch);
            Fragment::Atom(atom)
        }))
    }

    /// A character class over `chars`; see [`escape::class`].
    pub fn class(chars: impl IntoIterator<Item = char>) -> Fragment {
        let text = escape::class(chars);
        if text.is_empty() {
            Fragment::Empty
        } else {
            Fragment::Atom(text)
        }
    }

    /// Concatenates `parts`, dropping empty parts and flattening nested
    /// concatenations. A single remaining part is returned unwrapped.
    pub fn concat(parts: impl IntoIterator<Item = Fragment>) -> Fragment {
        let mut flat = Vec::new();
        for part in parts.into_iter().filter(|part| !part.is_empty()) {
            match part {
                Fragment::Concat(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() <= 1 {
            flat.pop().unwrap_or(Fragment::Empty)
        } else {
            Fragment::Concat(flat)
        }
    }

    /// Alternation over `branches`. A single branch is returned unwrapped.
    pub fn alternation(mut branches: Vec<Fragment>) -> Fragment {
        if branches.len() <= 1 {
            branches.pop().unwrap_or(Fragment::Empty)
        } else {
            Fragment::Alternation(branches)
        }
    }

    /// Makes the fragment optional. The empty fragment stays empty.
    pub fn optional(self) -> Fragment {
        match self {
            Fragment::Empty => Fragment::Empty,
            other => Fragment::Optional(Box::new(other)),
        }
    }

    /// True for the fragment that matches only the empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Fragment::Empty)
    }

    /// True if `?` can be appended without grouping.
    #[inline]
    pub fn is_atom(&self) -> bool {
        matches!(self, Fragment::Atom(_))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Empty => Ok(()),
            Fragment::Atom(text) => f.write_str(text),
            Fragment::Concat(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
            Fragment::Alternation(branches) => {
                f.write_char('(')?;
                for (last, branch) in branches.iter().mark_last() {
                    write!(f, "{branch}")?;
                    if !last {
                        f.write_char('|')?;
                    }
                }
                f.write_char(')')
            }
            Fragment::Optional(inner) => match inner.as_ref() {
                Fragment::Empty => Ok(()),
                Fragment::Atom(_) | Fragment::Alternation(_) => write!(f, "{inner}?"),
                Fragment::Concat(_) | Fragment::Optional(_) => write!(f, "({inner})?"),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn atom(text: &str) -> Fragment {
        Fragment::Atom(text.to_string())
    }

    #[test]
    fn literal_is_escaped_per_char() {
        assert_eq!(Fragment::literal("."), atom(r"\."));
        assert_eq!(
            Fragment::literal("a.b"),
            Fragment::Concat(vec![atom("a"), atom(r"\."), atom("b")])
        );
        assert_eq!(Fragment::literal(""), Fragment::Empty);
    }

    #[test]
    fn concat_flattens_and_drops_empty() {
        let f = Fragment::concat([
            Fragment::Empty,
            Fragment::literal("ab"),
            Fragment::Empty,
            Fragment::literal("c"),
        ]);
        assert_eq!(f, Fragment::Concat(vec![atom("a"), atom("b"), atom("c")]));
        assert_eq!(Fragment::concat([Fragment::Empty, atom("x")]), atom("x"));
        assert_eq!(Fragment::concat(Vec::new()), Fragment::Empty);
    }

    #[test]
    fn alternation_of_one_is_unwrapped() {
        assert_eq!(Fragment::alternation(vec![atom("x")]), atom("x"));
        assert_eq!(Fragment::alternation(vec![]), Fragment::Empty);
    }

    #[test]
    fn optional_atom_needs_no_group() {
        assert_eq!(atom(r"\.").optional().to_string(), r"\.?");
        assert_eq!(Fragment::class("ab".chars()).optional().to_string(), "[ab]?");
    }

    #[test]
    fn optional_concat_is_grouped() {
        assert_eq!(Fragment::literal("xy").optional().to_string(), "(xy)?");
        assert_eq!(Fragment::literal(" b").optional().to_string(), "( b)?");
    }

    #[test]
    fn optional_alternation_reuses_its_parens() {
        let alt = Fragment::alternation(vec![Fragment::literal("aa"), Fragment::literal("bb")]);
        assert_eq!(alt.to_string(), "(aa|bb)");
        assert_eq!(alt.optional().to_string(), "(aa|bb)?");
    }

    #[test]
    fn optional_empty_is_empty() {
        assert_eq!(Fragment::Empty.optional(), Fragment::Empty);
        assert!(Fragment::Empty.optional().is_empty());
        assert!(Fragment::literal("").is_empty());
        assert!(!Fragment::literal("a").optional().is_empty());
        assert!(Fragment::concat([Fragment::Empty, Fragment::class("".chars())]).is_empty());
    }

    #[test]
    fn nested_rendering() {
        let inner = Fragment::concat([Fragment::literal("s"), Fragment::literal("eph").optional()]);
        let alt = Fragment::alternation(vec![inner, atom("y").optional()]);
        let f = Fragment::concat([Fragment::literal("joe"), alt]);
        assert_eq!(f.to_string(), "joe(s(eph)?|y?)");
    }
}
