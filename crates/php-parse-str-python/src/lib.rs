//! Python bindings for php-parse-str-core.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use php_parse_str_core::{json::map_to_json, parse_str_with_config, Node, ParserConfig, QueryMap};

pyo3::create_exception!(php_parse_str, ParseStrError, pyo3::exceptions::PyValueError);

/// Convert a Node to a Python object.
fn node_to_python(py: Python<'_>, node: &Node) -> PyResult<PyObject> {
    match node {
        Node::Scalar(s) => Ok(s.to_object(py)),
        Node::List(items) => {
            let list = PyList::empty_bound(py);
            for item in items {
                list.append(node_to_python(py, item)?)?;
            }
            Ok(list.to_object(py))
        }
        Node::Map(map) => map_to_python(py, map),
    }
}

/// Convert a parse result to a Python dict.
fn map_to_python(py: Python<'_>, map: &QueryMap) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    for (key, node) in map {
        dict.set_item(key, node_to_python(py, node)?)?;
    }
    Ok(dict.to_object(py))
}

fn parse(data: &str, strict: bool, strict_utf8: bool) -> PyResult<QueryMap> {
    let config = ParserConfig {
        strict,
        strict_utf8,
    };

    let mut map = QueryMap::new();
    parse_str_with_config(data, &mut map, config)
        .map_err(|e| ParseStrError::new_err(format!("{}", e)))?;
    Ok(map)
}

/// Parse a URL query string the way PHP's `parse_str` does.
///
/// Args:
///     data: The query string, optionally starting with "?"
///     strict: Raise instead of overwriting when a key changes the shape of an
///         existing value, e.g. "a[]=1&a[x]=2" (default: False)
///     strict_utf8: Raise on percent-decoded bytes that are not UTF-8 instead
///         of replacing them (default: False)
///
/// Returns:
///     A dict whose values are str, list or dict
///
/// Raises:
///     ParseStrError: If a key or value has invalid percent-encoding, or on a
///         conflict in strict mode
///
/// Example:
///     >>> from php_parse_str import parse_str
///     >>> parse_str("user[name]=Alice&tags[]=a&tags[]=b")
///     {'user': {'name': 'Alice'}, 'tags': ['a', 'b']}
#[pyfunction]
#[pyo3(signature = (data, *, strict=false, strict_utf8=false))]
fn parse_str(py: Python<'_>, data: &str, strict: bool, strict_utf8: bool) -> PyResult<PyObject> {
    let map = parse(data, strict, strict_utf8)?;
    map_to_python(py, &map)
}

/// Parse a URL query string directly to a JSON string.
///
/// This avoids the overhead of creating intermediate Python objects.
///
/// Args:
///     data: The query string, optionally starting with "?"
///     strict: Raise on shape conflicts (default: False)
///     strict_utf8: Raise on invalid UTF-8 (default: False)
///
/// Returns:
///     A JSON object string
///
/// Raises:
///     ParseStrError: If the data cannot be parsed
///
/// Example:
///     >>> from php_parse_str import parse_str_json
///     >>> parse_str_json("a[]=1&a[]=2")
///     '{"a":["1","2"]}'
#[pyfunction]
#[pyo3(signature = (data, *, strict=false, strict_utf8=false))]
fn parse_str_json(data: &str, strict: bool, strict_utf8: bool) -> PyResult<String> {
    let map = parse(data, strict, strict_utf8)?;
    serde_json::to_string(&map_to_json(&map)).map_err(|e| ParseStrError::new_err(format!("{}", e)))
}

/// Get the version of the library.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// PHP parse_str module for Python.
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("ParseStrError", m.py().get_type_bound::<ParseStrError>())?;
    m.add_function(wrap_pyfunction!(parse_str, m)?)?;
    m.add_function(wrap_pyfunction!(parse_str_json, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
