//! Decoded query value types.

use std::collections::HashMap;
use std::fmt;

use crate::key::Segment;

/// The root output of a parse: top-level field names mapped to their nodes.
pub type QueryMap = HashMap<String, Node>;

/// A node in the decoded query tree.
///
/// Each `List` and `Map` owns its children outright, so the tree never
/// shares nodes between paths.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Node {
    /// A decoded leaf value. No numeric or boolean inference is applied.
    Scalar(String),

    /// An ordered list, grown by anonymous `[]` segments.
    List(Vec<Node>),

    /// A keyed mapping, grown by named `[key]` segments.
    Map(HashMap<String, Node>),
}

/// The shape of a [`Node`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::Scalar`].
    Scalar,
    /// [`Node::List`].
    List,
    /// [`Node::Map`].
    Map,
}

impl NodeKind {
    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Scalar => "scalar",
            NodeKind::List => "list",
            NodeKind::Map => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Create an empty container of the given kind.
    ///
    /// `NodeKind::Scalar` yields an empty string.
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Scalar => Node::Scalar(String::new()),
            NodeKind::List => Node::List(Vec::new()),
            NodeKind::Map => Node::Map(HashMap::new()),
        }
    }

    /// Create the empty container a segment descends into.
    #[inline]
    pub fn container_for(segment: &Segment) -> Self {
        Node::empty(segment.kind())
    }

    /// The shape of this node.
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Scalar(_) => NodeKind::Scalar,
            Node::List(_) => NodeKind::List,
            Node::Map(_) => NodeKind::Map,
        }
    }

    /// Check if the node is a scalar.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    /// Check if the node is a list.
    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Check if the node is a map.
    #[inline]
    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    /// Get the scalar value as a string slice.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the list items.
    #[inline]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the map entries.
    #[inline]
    pub fn as_map(&self) -> Option<&HashMap<String, Node>> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a child of a map node.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()?.get(key)
    }

    /// Get a type name for error messages.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(s) => write!(f, "\"{}\"", s),
            Node::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Node::Map(map) => {
                // Sorted so the rendering is stable across runs.
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} => {}", key, map[key])?;
                }
                write!(f, "}}")
            }
        }
    }
}
