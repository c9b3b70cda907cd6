//! Dot-path mapping between flat field names and nested config values.
//!
//! A [`FieldPath`] addresses exactly one leaf of the backend's configuration
//! tree (`retrieval.top_k` names `config["retrieval"]["top_k"]`). Parsing is
//! the single validation point: an empty path or an empty segment is rejected
//! with [`Error::Path`], so downstream mapping code never sees a malformed
//! name.
//!
//! Arrays are opaque leaves. Neither [`flatten_assign`] nor [`flatten_read`]
//! descends into them.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A validated, dot-joined key sequence addressing one config leaf.
///
/// Repeated segments (`a.a.a`) are legal and simply re-descend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dot-joined name into a path.
    ///
    /// Rejects the empty string and names with empty segments (`a..b`,
    /// leading/trailing dots). This is the consistent "reject" choice for the
    /// empty-path boundary: registry validation at startup is the one place
    /// malformed names can fail.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::path("empty field name"));
        }
        let segments: Vec<String> = name.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::path(format!("empty segment in '{name}'")));
        }
        Ok(Self { segments })
    }

    /// Number of segments. A path of depth N addresses a value nested N-1
    /// levels below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is a bare top-level key (no dots).
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Assign `value` at `path` inside `target`, creating intermediate objects.
///
/// Every non-final segment that is missing or holds a non-object value is
/// (re)initialized to an empty object before descent. The final segment is
/// assigned directly, overwriting whatever was there -- including a subtree.
/// If `target` itself is not object-typed it is replaced by an object first.
pub fn flatten_assign(target: &mut Value, path: &FieldPath, value: Value) {
    // parse() guarantees at least one segment.
    let Some((last, prefix)) = path.segments().split_last() else {
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    let mut current = target;
    for key in prefix {
        let Value::Object(map) = current else { return };
        let slot = map
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }

    let Value::Object(map) = current else { return };
    map.insert(last.clone(), value);
}

/// Read the leaf at `path` inside `source` without creating nodes.
///
/// Returns `None` -- the explicit absent signal, not an error -- whenever an
/// intermediate node is missing or not object-typed.
pub fn flatten_read<'a>(source: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = source;
    for key in path.segments() {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}
