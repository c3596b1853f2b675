/// Builds a `Vec<PathSegment>` from mixed key and index literals.
///
/// Object keys are given as string literals and array indices as integers,
/// so a path reads the way the data nests:
///
/// ```rust
/// use json_decode::{at, path, string};
/// use serde_json::json;
///
/// let decoder = at(path!["teams", 1, "captain"], string());
/// let input = json!({"teams": [{}, {"captain": "Ada"}]});
/// assert_eq!(decoder.decode_value(&input), Ok("Ada".to_string()));
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::PathSegment>::new()
    };

    ($($segment:expr),+ $(,)?) => {
        vec![$($crate::PathSegment::from($segment)),+]
    };
}
