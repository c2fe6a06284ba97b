//! Escaping of literal text and rendering of character classes.

use itertools::Itertools;
use smallvec::SmallVec;

/// Minimum number of consecutive code points written as a `first-last` range
/// inside a character class. Shorter runs are written out literally.
pub const MIN_RANGE_LEN: usize = 3;

/// Returns true if `ch` has to be escaped outside a character class.
#[inline]
pub fn is_meta(ch: char) -> bool {
    matches!(
        ch,
        '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
    )
}

/// Appends `ch` as a literal outside of a character class.
pub fn push_literal(out: &mut String, ch: char) {
    if is_meta(ch) {
        out.push('\\');
    }
    out.push(ch);
}

/// Escapes every metacharacter of `text`.
///
/// ```
/// use regroup::syntax::escape::escape;
///
/// assert_eq!(escape("1.5 (x)"), r"1\.5 \(x\)");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_literal(&mut out, ch);
    }
    out
}

// `^` only needs escaping where it would negate the class; the rest are
// escaped everywhere inside brackets.
fn push_class_member(out: &mut String, ch: char, opens_class: bool) {
    if matches!(ch, '\\' | '[' | ']' | '-' | '&' | '~') || (ch == '^' && opens_class) {
        out.push('\\');
    }
    out.push(ch);
}

/// Renders a set of characters as a single atom.
///
/// The characters are sorted and deduplicated. A set of one character is
/// written as that (escaped) character; anything larger becomes a bracket
/// expression in which runs of at least [`MIN_RANGE_LEN`] consecutive code
/// points are written as ranges. An empty set renders as the empty string.
///
/// ```
/// use regroup::syntax::escape::class;
///
/// assert_eq!(class("21".chars()), "[12]");
/// assert_eq!(class("0123456789".chars()), "[0-9]");
/// assert_eq!(class(['.']), r"\.");
/// ```
pub fn class(chars: impl IntoIterator<Item = char>) -> String {
    let mut chars: SmallVec<[char; 16]> = chars.into_iter().collect();
    chars.sort_unstable();
    chars.dedup();

    let mut out = String::new();
    match chars.as_slice() {
        [] => {}
        [only] => push_literal(&mut out, *only),
        _ => {
            out.push('[');
            let runs = chars.iter().map(|&ch| (ch, ch)).coalesce(|(start, end), (next, _)| {
                if next as u32 == end as u32 + 1 {
                    Ok((start, next))
                } else {
                    Err(((start, end), (next, next)))
                }
            });
            for (start, end) in runs {
                let len = (end as u32 - start as u32) as usize + 1;
                if len >= MIN_RANGE_LEN {
                    let opens_class = out.len() == 1;
                    push_class_member(&mut out, start, opens_class);
                    out.push('-');
                    push_class_member(&mut out, end, false);
                } else {
                    for ch in start..=end {
                        let opens_class = out.len() == 1;
                        push_class_member(&mut out, ch, opens_class);
                    }
                }
            }
            out.push(']');
        }
    }
    out
}
