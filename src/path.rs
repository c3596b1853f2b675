//! Path segments for traversing nested input.
//!
//! [`at`](crate::at) walks a path of object keys and array indices down into
//! an input tree. [`PathSegment`] is one step of that path; the [`path!`]
//! macro builds a full path from mixed string and integer literals:
//!
//! ```rust
//! use json_decode::{at, path, string};
//! use serde_json::json;
//!
//! let decoder = at(path!["users", 0, "name"], string());
//! let input = json!({"users": [{"name": "Ada"}]});
//! assert_eq!(decoder.decode_value(&input), Ok("Ada".to_string()));
//! ```
//!
//! [`path!`]: macro@crate::path

use serde_json::Value;
use std::fmt;

/// One step in an [`at`](crate::at) path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Look up a key in an object.
    Key(String),
    /// Look up an index in an array.
    Index(usize),
}

impl PathSegment {
    /// Renders the segment as it appears inside a stringified path prefix.
    pub(crate) fn to_value(&self) -> Value {
        match self {
            PathSegment::Key(key) => Value::String(key.clone()),
            PathSegment::Index(idx) => Value::from(*idx),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}
