//! Rendering of offending values for diagnostics.
//!
//! Diagnostics embed the value that failed to decode, so the rendering must
//! never itself fail or panic. Values are printed as compact JSON via
//! `serde_json`; if serialization is impossible for a value, a fixed
//! placeholder is substituted instead.
//!
//! An owned [`Value`] tree cannot contain reference cycles, so the placeholder
//! is only reachable through serializer failure, not through traversal loops.

use serde_json::Value;

/// Substituted for any value that cannot be rendered as JSON text.
pub const UNPRINTABLE: &str = "[Cyclical Reference]";

/// Renders a value as compact JSON for embedding in a diagnostic.
///
/// # Examples
///
/// ```rust
/// use json_decode::stringify::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
/// assert_eq!(stringify(&json!(null)), "null");
/// ```
#[must_use]
pub fn stringify(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| UNPRINTABLE.to_string())
}
