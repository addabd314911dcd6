//! PHP `parse_str` compatible query string parser.
//!
//! Splits the input on `&`, decodes each `key=value` pair, decomposes the key
//! into its bracket segments and writes the value into a shared [`QueryMap`].
//!
//! # Error Handling
//!
//! The first pair that fails to decode aborts the call. Pairs applied before
//! it stay in the output map; nothing is rolled back.
//!
//! # Tracing Support
//!
//! Enable the `tracing` feature for detailed parsing instrumentation:
//!
//! ```toml
//! php-parse-str-core = { version = "0.1", features = ["tracing"] }
//! ```

use memchr::memchr;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument, trace, warn};

use crate::builder::{insert, ConflictMode};
use crate::decode::decode_component;
use crate::error::{ParseStrError, Result};
use crate::key::decompose_key;
use crate::types::QueryMap;

/// Parser configuration options.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Reject pairs that would change the shape of an existing node.
    ///
    /// When `strict` is `false` (the default), a pair such as `a[x]=2` after
    /// `a[]=1` replaces the list with a fresh map, as PHP does. When `true`,
    /// the parse fails with `ErrorKind::ShapeConflict` instead.
    pub strict: bool,
    /// Fail on decoded bytes that are not UTF-8 instead of replacing them
    /// with U+FFFD.
    pub strict_utf8: bool,
}

impl ParserConfig {
    #[inline]
    fn conflict_mode(&self) -> ConflictMode {
        if self.strict {
            ConflictMode::Reject
        } else {
            ConflictMode::Overwrite
        }
    }
}

/// A query string parser.
pub struct Parser<'a> {
    /// Input string, possibly prefixed with `?`.
    input: &'a str,
    /// Parser configuration.
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    /// Create a new parser with custom configuration.
    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self { input, config }
    }

    /// Parse the input into a fresh map.
    pub fn parse(&self) -> Result<QueryMap> {
        let mut map = QueryMap::new();
        self.parse_into(&mut map)?;
        Ok(map)
    }

    /// Parse the input into an existing map, merging with what it holds.
    ///
    /// If the `tracing` feature is enabled, this method will emit trace events.
    #[cfg_attr(feature = "tracing", instrument(skip(self, map), fields(input_len = self.input.len())))]
    pub fn parse_into(&self, map: &mut QueryMap) -> Result<()> {
        #[cfg(feature = "tracing")]
        debug!(input_len = self.input.len(), "Starting parse_str");

        let query = self.input.trim_start_matches('?');
        let mut result = Ok(());
        if !query.is_empty() {
            for (index, pair) in query.split('&').enumerate() {
                result = self.apply_pair(map, index, pair);
                if result.is_err() {
                    break;
                }
            }
        }

        #[cfg(feature = "tracing")]
        match &result {
            Ok(()) => debug!(fields = map.len(), "Parse completed successfully"),
            Err(e) => warn!(error = %e, "Parse failed"),
        }

        result
    }

    /// Decode one pair and write it into `map`.
    fn apply_pair(&self, map: &mut QueryMap, index: usize, pair: &str) -> Result<()> {
        // A missing `=` or an empty raw key drops the pair.
        let Some(eq) = memchr(b'=', pair.as_bytes()).filter(|&eq| eq > 0) else {
            #[cfg(feature = "tracing")]
            trace!(index, "Skipping pair without key");
            return Ok(());
        };
        let (raw_key, raw_value) = (&pair[..eq], &pair[eq + 1..]);

        let key = decode_component(raw_key, self.config.strict_utf8)
            .map_err(|kind| ParseStrError::new(kind, index, pair).with_context("decoding key"))?;

        let Some(path) = decompose_key(&key) else {
            #[cfg(feature = "tracing")]
            trace!(index, key = %key, "Skipping pair with empty or bracketed key");
            return Ok(());
        };

        let value = decode_component(raw_value, self.config.strict_utf8)
            .map_err(|kind| ParseStrError::new(kind, index, pair).with_context("decoding value"))?;

        #[cfg(feature = "tracing")]
        trace!(index, path = %path, "Applying pair");

        insert(map, &path, value.into_owned(), self.config.conflict_mode())
            .map_err(|kind| ParseStrError::new(kind, index, pair))
    }
}

/// Parse a query string into an existing map.
///
/// This is the primary API, equivalent to PHP's `parse_str($input, $result)`
/// except that `result` keeps whatever it held before the call.
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::{parse_str, QueryMap};
///
/// let mut map = QueryMap::new();
/// parse_str("?tags[]=a&tags[]=b&user[name]=Alice", &mut map).unwrap();
///
/// assert_eq!(map["tags"].as_list().map(|l| l.len()), Some(2));
/// assert_eq!(map["user"].get("name").and_then(|n| n.as_str()), Some("Alice"));
/// ```
#[inline]
pub fn parse_str(input: &str, map: &mut QueryMap) -> Result<()> {
    #[cfg(feature = "tracing")]
    trace!(input_len = input.len(), "parse_str called");

    Parser::new(input).parse_into(map)
}

/// Parse a query string into an existing map with custom configuration.
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::{parse_str_with_config, ErrorKind, ParserConfig, QueryMap};
///
/// let config = ParserConfig {
///     strict: true,
///     ..Default::default()
/// };
/// let mut map = QueryMap::new();
/// let err = parse_str_with_config("a[]=1&a[x]=2", &mut map, config).unwrap_err();
/// assert!(matches!(err.kind, ErrorKind::ShapeConflict { .. }));
/// ```
#[inline]
pub fn parse_str_with_config(input: &str, map: &mut QueryMap, config: ParserConfig) -> Result<()> {
    #[cfg(feature = "tracing")]
    trace!(input_len = input.len(), ?config, "parse_str_with_config called");

    Parser::with_config(input, config).parse_into(map)
}

/// Parse a query string into a new map.
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::{from_str, Node};
///
/// let map = from_str("k1=v1&k2=v+2").unwrap();
/// assert_eq!(map["k2"], Node::from("v 2"));
/// ```
#[inline]
pub fn from_str(input: &str) -> Result<QueryMap> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::Node;

    fn scalar(s: &str) -> Node {
        Node::from(s)
    }

    fn map_of(entries: &[(&str, Node)]) -> QueryMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_flat_pairs() {
        let result = from_str("k1=v1&k2=v2").unwrap();
        assert_eq!(result, map_of(&[("k1", scalar("v1")), ("k2", scalar("v2"))]));
    }

    #[test]
    fn test_list_in_input_order() {
        let result = from_str("a[]=1&a[]=2").unwrap();
        assert_eq!(
            result,
            map_of(&[("a", Node::List(vec![scalar("1"), scalar("2")]))])
        );
    }

    #[test]
    fn test_named_segments() {
        let result = from_str("a[b]=1&a[c]=2").unwrap();
        let inner = map_of(&[("b", scalar("1")), ("c", scalar("2"))]);
        assert_eq!(result, map_of(&[("a", Node::Map(inner))]));
    }

    #[test]
    fn test_list_under_map() {
        let result = from_str("a[b][]=1&a[b][]=2").unwrap();
        let inner = map_of(&[("b", Node::List(vec![scalar("1"), scalar("2")]))]);
        assert_eq!(result, map_of(&[("a", Node::Map(inner))]));
    }

    #[test]
    fn test_empty_and_bracketed_keys_dropped() {
        let result = from_str("=x&[y]=1&k=v").unwrap();
        assert_eq!(result, map_of(&[("k", scalar("v"))]));
    }

    #[test]
    fn test_pairs_without_equals_dropped() {
        let result = from_str("flag&&k=v&=").unwrap();
        assert_eq!(result, map_of(&[("k", scalar("v"))]));
    }

    #[test]
    fn test_leading_question_marks() {
        assert_eq!(from_str("?a=1").unwrap(), from_str("a=1").unwrap());
        assert_eq!(from_str("???a=1").unwrap(), from_str("a=1").unwrap());
        assert!(from_str("?").unwrap().is_empty());
        assert!(from_str("").unwrap().is_empty());
    }

    #[test]
    fn test_shape_conflict_overwrites() {
        let result = from_str("a[]=1&a[x]=2").unwrap();
        assert_eq!(
            result,
            map_of(&[("a", Node::Map(map_of(&[("x", scalar("2"))])))])
        );
    }

    #[test]
    fn test_duplicate_scalar_last_wins() {
        let result = from_str("k=1&k=2").unwrap();
        assert_eq!(result, map_of(&[("k", scalar("2"))]));
    }

    #[test]
    fn test_value_decode_error_stops_parsing() {
        let mut map = QueryMap::new();
        let err = parse_str("a=1&k=%&b=2", &mut map).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPercentEncoding { position: 0 });
        assert_eq!(err.pair, "k=%");
        assert_eq!(err.pair_index, 1);
        // Earlier pairs stay applied, later ones never run.
        assert_eq!(map, map_of(&[("a", scalar("1"))]));
    }

    #[test]
    fn test_key_decode_error() {
        let err = from_str("a%zz=1").unwrap_err();
        assert!(err.kind.is_decode_error());
        assert_eq!(err.context.as_deref(), Some("decoding key"));
    }

    #[test]
    fn test_skipped_pair_value_not_decoded() {
        let result = from_str("[x]=%&k=v").unwrap();
        assert_eq!(result, map_of(&[("k", scalar("v"))]));
    }

    #[test]
    fn test_encoded_brackets_and_spaces() {
        let result = from_str("+first+name%5B%5D=a+b&x.y=%3D").unwrap();
        assert_eq!(result["first_name"], Node::List(vec![scalar("a b")]));
        assert_eq!(result["x_y"], scalar("="));
    }

    #[test]
    fn test_value_keeps_later_equals() {
        let result = from_str("expr=a=b").unwrap();
        assert_eq!(result["expr"], scalar("a=b"));
    }

    #[test]
    fn test_no_type_inference() {
        let result = from_str("n=42&b=true&e=").unwrap();
        assert_eq!(result["n"], scalar("42"));
        assert_eq!(result["b"], scalar("true"));
        assert_eq!(result["e"], scalar(""));
    }

    #[test]
    fn test_accumulates_into_existing_map() {
        let mut map = QueryMap::new();
        parse_str("a[]=1", &mut map).unwrap();
        parse_str("a[]=2&b=x", &mut map).unwrap();
        assert_eq!(map["a"], Node::List(vec![scalar("1"), scalar("2")]));
        assert_eq!(map["b"], scalar("x"));
    }

    #[test]
    fn test_idempotent() {
        let input = "a[b][]=1&a[b][]=2&c=3&d[]=x&d[y]=z";
        assert_eq!(from_str(input).unwrap(), from_str(input).unwrap());
    }

    #[test]
    fn test_strict_mode_reports_conflict() {
        let config = ParserConfig {
            strict: true,
            ..Default::default()
        };
        let mut map = QueryMap::new();
        let err = parse_str_with_config("a[]=1&a[x]=2", &mut map, config).unwrap_err();
        assert_eq!(err.pair_index, 1);
        assert!(!err.kind.is_decode_error());
        assert_eq!(map["a"], Node::List(vec![scalar("1")]));
    }

    #[test]
    fn test_strict_utf8() {
        assert_eq!(from_str("k=%C3").unwrap()["k"], scalar("\u{FFFD}"));

        let config = ParserConfig {
            strict_utf8: true,
            ..Default::default()
        };
        let err = Parser::with_config("k=%C3", config).parse().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_strict_false_is_default() {
        let config = ParserConfig::default();
        assert!(!config.strict);
        assert!(!config.strict_utf8);
    }

    #[test]
    fn test_deeply_nested_path() {
        let key: String = std::iter::once("root".to_string())
            .chain((0..100).map(|i| format!("[k{}]", i)))
            .collect();
        let result = from_str(&format!("{}=leaf", key)).unwrap();
        let mut node = &result["root"];
        for i in 0..100 {
            node = node.get(&format!("k{}", i)).unwrap();
        }
        assert_eq!(node, &scalar("leaf"));
    }
}
