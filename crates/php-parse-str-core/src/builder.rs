//! Structure building.
//!
//! Writes one decoded pair into a [`QueryMap`], creating the maps and lists
//! its key path calls for. Named segments index into maps, anonymous
//! segments always append a fresh slot to a list.

use crate::error::ErrorKind;
use crate::key::{KeyPath, Segment};
use crate::types::{Node, NodeKind, QueryMap};

/// What to do when a path already holds a node of another shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictMode {
    /// Replace the existing node with an empty one of the required shape.
    /// Its previous contents are discarded. This is PHP's behavior.
    #[default]
    Overwrite,
    /// Fail with [`ErrorKind::ShapeConflict`] and leave the node untouched.
    Reject,
}

/// Insert `value` at `path` inside `map`.
///
/// Never fails with [`ConflictMode::Overwrite`].
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::builder::{insert, ConflictMode};
/// use php_parse_str_core::key::decompose_key;
/// use php_parse_str_core::QueryMap;
///
/// let mut map = QueryMap::new();
/// let path = decompose_key("a[]").unwrap();
/// insert(&mut map, &path, "1".to_string(), ConflictMode::Overwrite).unwrap();
/// insert(&mut map, &path, "2".to_string(), ConflictMode::Overwrite).unwrap();
/// assert_eq!(map["a"].as_list().map(|l| l.len()), Some(2));
/// ```
pub fn insert(
    map: &mut QueryMap,
    path: &KeyPath,
    value: String,
    mode: ConflictMode,
) -> Result<(), ErrorKind> {
    let Some(first) = path.segments.first() else {
        return assign_scalar(map, &path.head, value, mode, || path.prefix(0));
    };

    let root = map
        .entry(path.head.clone())
        .or_insert_with(|| Node::container_for(first));
    descend(root, path, 0, value, mode)
}

/// Walk segment `depth` of `path` starting at `node`.
fn descend(
    node: &mut Node,
    path: &KeyPath,
    depth: usize,
    value: String,
    mode: ConflictMode,
) -> Result<(), ErrorKind> {
    let segment = &path.segments[depth];
    let next = path.segments.get(depth + 1);

    match (segment, node) {
        (Segment::Named(key), Node::Map(map)) => match next {
            None => assign_scalar(map, key, value, mode, || path.prefix(depth + 1)),
            Some(next) => {
                let child = map
                    .entry(key.clone())
                    .or_insert_with(|| Node::container_for(next));
                descend(child, path, depth + 1, value, mode)
            }
        },
        (Segment::Anonymous, Node::List(list)) => match next {
            None => {
                list.push(Node::Scalar(value));
                Ok(())
            }
            Some(next) => {
                let slot = list.len();
                list.push(Node::container_for(next));
                descend(&mut list[slot], path, depth + 1, value, mode)
            }
        },
        (segment, node) => {
            if mode == ConflictMode::Reject {
                return Err(ErrorKind::ShapeConflict {
                    path: path.prefix(depth),
                    expected: segment.kind(),
                    found: node.kind(),
                });
            }
            *node = Node::container_for(segment);
            descend(node, path, depth, value, mode)
        }
    }
}

/// Set `map[key]` to a scalar, last write wins.
fn assign_scalar(
    map: &mut QueryMap,
    key: &str,
    value: String,
    mode: ConflictMode,
    describe: impl FnOnce() -> String,
) -> Result<(), ErrorKind> {
    if mode == ConflictMode::Reject {
        if let Some(existing) = map.get(key).filter(|node| !node.is_scalar()) {
            return Err(ErrorKind::ShapeConflict {
                path: describe(),
                expected: NodeKind::Scalar,
                found: existing.kind(),
            });
        }
    }
    map.insert(key.to_string(), Node::Scalar(value));
    Ok(())
}
