//! PHP `parse_str` compatible query string parser.
//!
//! This crate turns a flat `application/x-www-form-urlencoded` string into a
//! nested tree of scalars, lists and maps, following PHP's bracket-array
//! rules for keys such as `user[name]` and `tags[]`.
//!
//! # Features
//!
//! - **PHP-compatible keys** - Bracket segments, head sanitization and skip rules match `parse_str`
//! - **Strongly typed output** - Every node is a `Scalar`, `List` or `Map`
//! - **Merging** - Parse several strings into one map
//! - **Strict modes** - Optionally reject shape conflicts and invalid UTF-8
//! - **Detailed errors** - Every error names the offending pair
//!
//! # Quick Start
//!
//! ```rust
//! use php_parse_str_core::{from_str, Node};
//!
//! let map = from_str("user[name]=Alice&user[roles][]=admin&user[roles][]=dev").unwrap();
//!
//! let user = &map["user"];
//! assert_eq!(user.get("name"), Some(&Node::from("Alice")));
//! assert_eq!(user.get("roles").and_then(Node::as_list).map(<[Node]>::len), Some(2));
//! ```
//!
//! # Key Rules
//!
//! | Input key | Head | Segments |
//! |-----------|------|----------|
//! | `a` | `a` | none |
//! | `a[]` | `a` | `Anonymous` |
//! | `a[b][]` | `a` | `Named("b")`, `Anonymous` |
//! | `first name.x` | `first_name_x` | none |
//! | `a[b]c[d]` | `a` | `Named("b")` (scanning stops at the gap) |
//! | `[a]`, empty | pair dropped | |
//!
//! # Shape Conflicts
//!
//! A later pair that needs a different shape at an existing path replaces the
//! node: `a[]=1&a[x]=2` yields `{a: {x: "2"}}`. Set [`ParserConfig::strict`]
//! to get an error instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::inline_always)]

pub mod builder;
pub mod decode;
pub mod error;
pub mod key;
pub mod parser;
pub mod types;

#[cfg(feature = "serde")]
pub mod json;

pub use builder::ConflictMode;
pub use error::{ErrorKind, ParseStrError, Result};
pub use key::{decompose_key, KeyPath, Segment};
pub use parser::{from_str, parse_str, parse_str_with_config, Parser, ParserConfig};
pub use types::{Node, NodeKind, QueryMap};

#[cfg(feature = "serde")]
pub use json::to_json;
