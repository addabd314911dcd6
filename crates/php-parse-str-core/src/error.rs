//! Error types for query string parsing.
//!
//! Every error identifies the `key=value` pair that triggered it, so callers
//! can report the offending input verbatim.

use std::fmt;
use thiserror::Error;

use crate::types::NodeKind;

/// The main error type for query string parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseStrError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Zero-based index of the pair within the `&`-separated input.
    pub pair_index: usize,
    /// The raw, still-encoded text of the offending pair.
    pub pair: String,
    /// Optional context about what was being processed.
    pub context: Option<String>,
}

impl fmt::Display for ParseStrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in pair #{} `{}`", self.kind, self.pair_index, self.pair)?;
        if let Some(ref ctx) = self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

/// Specific kinds of parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `%` not followed by two hexadecimal digits.
    #[error("invalid percent-encoding at byte {position}")]
    InvalidPercentEncoding {
        /// Byte offset of the `%` within the key or value being decoded.
        position: usize,
    },

    /// Decoded bytes are not valid UTF-8 (only with `strict_utf8`).
    #[error("decoded text is not valid UTF-8")]
    InvalidUtf8,

    /// A path already holds a node of another shape (only in strict mode).
    #[error("shape conflict at `{path}`: expected {expected}, found {found}")]
    ShapeConflict {
        /// The path at which the conflict was detected, in bracket syntax.
        path: String,
        /// The node kind the pair required.
        expected: NodeKind,
        /// The node kind already present.
        found: NodeKind,
    },
}

impl ErrorKind {
    /// Whether this error stems from percent-decoding rather than structure.
    #[inline]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidPercentEncoding { .. } | ErrorKind::InvalidUtf8
        )
    }
}

impl ParseStrError {
    /// Create a new error for the given pair.
    #[inline]
    pub fn new(kind: ErrorKind, pair_index: usize, pair: impl Into<String>) -> Self {
        Self {
            kind,
            pair_index,
            pair: pair.into(),
            context: None,
        }
    }

    /// Add context to the error.
    #[inline]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Result type alias for query string parsing.
pub type Result<T> = std::result::Result<T, ParseStrError>;
