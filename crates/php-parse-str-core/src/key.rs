//! Key decomposition.
//!
//! Splits an already percent-decoded key such as `user[tags][]` into a
//! sanitized top-level name (`user`) and its bracket segments
//! (`Named("tags")`, `Anonymous`), following PHP's `parse_str` rules:
//!
//! - Leading spaces are stripped, but never down to an empty key.
//! - Keys that are empty or start with `[` are dropped.
//! - Only a contiguous run of `[..][..]` directly after the head is honored;
//!   anything after the first gap is ignored.
//! - Spaces, dots and a stray `[` in the head become `_`.

use std::fmt;

use crate::types::NodeKind;

/// One bracket group following the head of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `[name]`: descends into a map entry.
    Named(String),
    /// `[]`: appends a new slot to a list.
    Anonymous,
}

impl Segment {
    fn from_raw(content: &str) -> Self {
        if content.is_empty() {
            Segment::Anonymous
        } else {
            Segment::Named(content.to_string())
        }
    }

    /// The kind of container this segment indexes into.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Segment::Named(_) => NodeKind::Map,
            Segment::Anonymous => NodeKind::List,
        }
    }
}

/// A decomposed key: the top-level name plus its bracket segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    /// Sanitized top-level field name.
    pub head: String,
    /// Bracket segments in input order; empty for a plain `key=value`.
    pub segments: Vec<Segment>,
}

impl KeyPath {
    /// Render the head and the first `depth` segments in bracket syntax.
    pub fn prefix(&self, depth: usize) -> String {
        let mut out = self.head.clone();
        for segment in self.segments.iter().take(depth) {
            match segment {
                Segment::Named(name) => {
                    out.push('[');
                    out.push_str(name);
                    out.push(']');
                }
                Segment::Anonymous => out.push_str("[]"),
            }
        }
        out
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix(self.segments.len()))
    }
}

/// Scanner state while walking a key left to right.
#[derive(Debug, Clone, Copy)]
enum ScanState {
    /// Before the first `[`.
    InHead,
    /// Inside a bracket group opened at the given byte offset.
    InSegment { open: usize },
    /// Directly after a `]`; only another `[` continues the run.
    AfterSegment,
}

/// Decompose a percent-decoded key.
///
/// Returns `None` when the pair must be skipped: the key is empty or starts
/// with `[` once leading spaces are stripped.
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::key::{decompose_key, Segment};
///
/// let path = decompose_key("user.name[tags][]").unwrap();
/// assert_eq!(path.head, "user_name");
/// assert_eq!(
///     path.segments,
///     vec![Segment::Named("tags".into()), Segment::Anonymous]
/// );
/// assert!(decompose_key("[x]").is_none());
/// ```
pub fn decompose_key(key: &str) -> Option<KeyPath> {
    let key = strip_leading_spaces(key);
    if key.is_empty() || key.starts_with('[') {
        return None;
    }

    let mut state = ScanState::InHead;
    let mut head_end = key.len();
    let mut segments = Vec::new();

    for (i, ch) in key.char_indices() {
        state = match (state, ch) {
            (ScanState::InHead, '[') => ScanState::InSegment { open: i },
            (ScanState::InHead, _) => ScanState::InHead,
            (ScanState::InSegment { open }, ']') => {
                if segments.is_empty() {
                    head_end = open;
                }
                segments.push(Segment::from_raw(&key[open + 1..i]));
                ScanState::AfterSegment
            }
            (ScanState::InSegment { open }, _) => ScanState::InSegment { open },
            (ScanState::AfterSegment, '[') => ScanState::InSegment { open: i },
            (ScanState::AfterSegment, _) => break,
        };
    }

    Some(KeyPath {
        head: sanitize_head(&key[..head_end]),
        segments,
    })
}

/// Replace spaces, dots and `[` in a head with `_`.
///
/// At the first `[` the rest of the head is kept verbatim, mirroring PHP's
/// handling of an unterminated bracket in a field name.
pub fn sanitize_head(head: &str) -> String {
    let mut out = String::with_capacity(head.len());
    for (i, ch) in head.char_indices() {
        match ch {
            ' ' | '.' => out.push('_'),
            '[' => {
                out.push('_');
                out.push_str(&head[i + 1..]);
                break;
            }
            _ => out.push(ch),
        }
    }
    out
}

#[inline]
fn strip_leading_spaces(mut key: &str) -> &str {
    while key.len() > 1 && key.starts_with(' ') {
        key = &key[1..];
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(s: &str) -> Segment {
        Segment::Named(s.to_string())
    }

    #[test]
    fn test_plain_key() {
        let path = decompose_key("name").unwrap();
        assert_eq!(path.head, "name");
        assert!(path.segments.is_empty());
    }

    #[test]
    fn test_segments() {
        let path = decompose_key("a[b][][c]").unwrap();
        assert_eq!(path.head, "a");
        assert_eq!(path.segments, vec![named("b"), Segment::Anonymous, named("c")]);
        assert_eq!(path.to_string(), "a[b][][c]");
        assert_eq!(path.prefix(1), "a[b]");
    }

    #[test]
    fn test_skipped_keys() {
        assert!(decompose_key("").is_none());
        assert!(decompose_key("[a]").is_none());
        assert!(decompose_key("  [a]").is_none());
    }

    #[test]
    fn test_leading_spaces_never_empty() {
        assert_eq!(decompose_key("  a").unwrap().head, "a");
        // A key made only of spaces keeps its last one, which is sanitized.
        assert_eq!(decompose_key("   ").unwrap().head, "_");
    }

    #[test]
    fn test_head_sanitized() {
        assert_eq!(decompose_key("first name.x").unwrap().head, "first_name_x");
        assert_eq!(decompose_key("a.b[c.d]").unwrap().segments, vec![named("c.d")]);
    }

    #[test]
    fn test_unclosed_bracket_in_head() {
        let path = decompose_key("a[b.c").unwrap();
        assert_eq!(path.head, "a_b.c");
        assert!(path.segments.is_empty());

        assert_eq!(decompose_key("x.y[z w").unwrap().head, "x_y_z w");
    }

    #[test]
    fn test_gap_stops_scanning() {
        let path = decompose_key("a[b]c[d]").unwrap();
        assert_eq!(path.head, "a");
        assert_eq!(path.segments, vec![named("b")]);

        let path = decompose_key("a[b][c]x[d]").unwrap();
        assert_eq!(path.segments, vec![named("b"), named("c")]);
    }

    #[test]
    fn test_trailing_unclosed_segment_ignored() {
        let path = decompose_key("a[b][c").unwrap();
        assert_eq!(path.segments, vec![named("b")]);
    }

    #[test]
    fn test_nested_open_bracket_is_content() {
        let path = decompose_key("a[b[c]]").unwrap();
        assert_eq!(path.head, "a");
        assert_eq!(path.segments, vec![named("b[c")]);
    }

    #[test]
    fn test_close_bracket_in_head_is_text() {
        let path = decompose_key("a]b[c]").unwrap();
        assert_eq!(path.head, "a]b");
        assert_eq!(path.segments, vec![named("c")]);
    }

    #[test]
    fn test_multibyte_head() {
        let path = decompose_key("이름[성]").unwrap();
        assert_eq!(path.head, "이름");
        assert_eq!(path.segments, vec![named("성")]);
    }
}
