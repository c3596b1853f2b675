//! Primitive and structural decoder constructors.
//!
//! These free functions populate the [`Decoder`](crate::Decoder) algebra with
//! decoders for the common shapes: scalars, dates, arrays, object fields,
//! nested paths, optional values, alternatives, and dictionaries.
//!
//! Every constructor first validates the runtime shape of its input and
//! produces a diagnostic naming the expected shape and the offending value;
//! none of them panic on unexpected input.
//!
//! ## Examples
//!
//! ```rust
//! use json_decode::{array, field, nullable, number, string};
//! use serde_json::json;
//!
//! let prices = field("prices", array(nullable(number())));
//! let input = json!({"prices": [1.5, null, 2.0]});
//! assert_eq!(
//!     prices.decode_value(&input),
//!     Ok(vec![Some(1.5), None, Some(2.0)])
//! );
//! ```

use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::path::PathSegment;
use crate::stringify::stringify;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::Value;

/// A decoder that ignores its input and always succeeds with `value`.
///
/// The starting point of an [`assign`](Decoder::assign) chain, and the usual
/// way to resolve a branch of [`and_then`](Decoder::and_then) to a constant.
///
/// # Examples
///
/// ```rust
/// use json_decode::succeed;
/// use serde_json::json;
///
/// assert_eq!(succeed(7).decode_value(&json!("anything")), Ok(7));
/// ```
pub fn succeed<A>(value: A) -> Decoder<A>
where
    A: Clone + Send + Sync + 'static,
{
    Decoder::new(move |_| Ok(value.clone()))
}

/// A decoder that ignores its input and always fails with `message`.
///
/// # Examples
///
/// ```rust
/// use json_decode::fail;
///
/// let decoder = fail::<String>("unsupported version");
/// let err = decoder.decode_json("true").unwrap_err();
/// assert_eq!(err.message(), "unsupported version");
/// ```
pub fn fail<A>(message: impl Into<String>) -> Decoder<A>
where
    A: 'static,
{
    let message = message.into();
    Decoder::new(move |_| Err(DecodeError::new(message.clone())))
}

/// Decodes a JSON string.
///
/// # Examples
///
/// ```rust
/// use json_decode::string;
/// use serde_json::json;
///
/// assert_eq!(string().decode_value(&json!("hi")), Ok("hi".to_string()));
/// assert!(string().decode_value(&json!(42)).is_err());
/// ```
#[must_use]
pub fn string() -> Decoder<String> {
    Decoder::new(|value| match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(expected("string", other)),
    })
}

/// Decodes a JSON number as an `f64`.
///
/// # Examples
///
/// ```rust
/// use json_decode::number;
/// use serde_json::json;
///
/// assert_eq!(number().decode_value(&json!(1.5)), Ok(1.5));
/// assert_eq!(number().decode_value(&json!(3)), Ok(3.0));
/// assert!(number().decode_value(&json!("3")).is_err());
/// ```
#[must_use]
pub fn number() -> Decoder<f64> {
    Decoder::new(|value| match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| expected("number", value)),
        other => Err(expected("number", other)),
    })
}

/// Decodes a JSON boolean.
///
/// # Examples
///
/// ```rust
/// use json_decode::boolean;
/// use serde_json::json;
///
/// assert_eq!(boolean().decode_value(&json!(true)), Ok(true));
/// assert!(boolean().decode_value(&json!(0)).is_err());
/// ```
#[must_use]
pub fn boolean() -> Decoder<bool> {
    Decoder::new(|value| match value {
        Value::Bool(b) => Ok(*b),
        other => Err(expected("boolean", other)),
    })
}

/// Decodes a date from a string or a number.
///
/// Strings are tried as RFC 3339 first, then RFC 2822, then the common
/// `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD` forms (interpreted as UTC). Numbers
/// are milliseconds since the Unix epoch. Anything else, or a value neither
/// parse accepts, fails with a single diagnostic regardless of which branch
/// rejected it.
///
/// # Examples
///
/// ```rust
/// use chrono::{Datelike, TimeZone, Utc};
/// use json_decode::date;
/// use serde_json::json;
///
/// let d = date().decode_value(&json!("2021-03-04T05:06:07Z")).unwrap();
/// assert_eq!(d.year(), 2021);
///
/// let epoch = date().decode_value(&json!(0)).unwrap();
/// assert_eq!(epoch, Utc.timestamp_millis_opt(0).unwrap());
///
/// assert!(date().decode_value(&json!("not a date")).is_err());
/// assert!(date().decode_value(&json!(true)).is_err());
/// ```
#[must_use]
pub fn date() -> Decoder<DateTime<Utc>> {
    Decoder::new(|value| {
        let parsed = match value {
            Value::String(s) => parse_date_text(s),
            Value::Number(n) => n.as_f64().and_then(from_epoch_millis),
            _ => None,
        };
        parsed.ok_or_else(|| {
            DecodeError::new(format!(
                "I expected a date but instead I found {}",
                stringify(value)
            ))
        })
    })
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    // Fractional milliseconds are truncated, as with an integer timestamp.
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Applies `inner` to every element of a JSON array, left to right.
///
/// Decoding is fail-fast: the first element failure stops the walk and the
/// diagnostic embeds the failing index.
///
/// # Examples
///
/// ```rust
/// use json_decode::{array, string};
/// use serde_json::json;
///
/// let strings = array(string());
/// assert_eq!(
///     strings.decode_value(&json!(["a", "b"])),
///     Ok(vec!["a".to_string(), "b".to_string()])
/// );
///
/// let err = strings.decode_value(&json!(["a", 2])).unwrap_err();
/// assert!(err.message().contains("at [1]"));
/// ```
#[must_use]
pub fn array<A>(inner: Decoder<A>) -> Decoder<Vec<A>>
where
    A: 'static,
{
    Decoder::new(move |value| {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(DecodeError::new(format!(
                    "I expected an array but instead I found {}",
                    stringify(other)
                )))
            }
        };
        let mut decoded = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match inner.decode_value(item) {
                Ok(v) => decoded.push(v),
                Err(e) => {
                    return Err(DecodeError::new(format!(
                        "I found an error in the array at [{idx}]: {e}"
                    )))
                }
            }
        }
        Ok(decoded)
    })
}

/// Decodes the value of the `name` field of a JSON object.
///
/// Fails if the input is not an object or lacks the field; an inner failure
/// is wrapped with the field name and the containing object.
///
/// # Examples
///
/// ```rust
/// use json_decode::{field, number};
/// use serde_json::json;
///
/// let x = field("x", number());
/// assert_eq!(x.decode_value(&json!({"x": 5})), Ok(5.0));
///
/// let err = x.decode_value(&json!({})).unwrap_err();
/// assert!(err.message().contains("key 'x'"));
/// ```
#[must_use]
pub fn field<A>(name: impl Into<String>, inner: Decoder<A>) -> Decoder<A>
where
    A: 'static,
{
    let name = name.into();
    Decoder::new(move |value| {
        let member = match value {
            Value::Object(map) => map.get(&name),
            _ => None,
        };
        match member {
            Some(v) => inner.decode_value(v).map_err(|e| {
                DecodeError::new(format!(
                    "I found an error in the field named '{name}' of {}: {e}",
                    stringify(value)
                ))
            }),
            None => Err(DecodeError::new(format!(
                "I expected to find an object with key '{name}' but instead I found {}",
                stringify(value)
            ))),
        }
    })
}

/// Walks `path` into a nested structure, then decodes the resolved value
/// with `inner`.
///
/// A null input fails immediately. If any step of the path resolves to a
/// missing member or an explicit null, the diagnostic cites the path prefix
/// traversed so far and the original top-level input. Failures from `inner`
/// propagate as-is, without extra path context.
///
/// # Examples
///
/// ```rust
/// use json_decode::{at, path, string};
/// use serde_json::json;
///
/// let city = at(path!["address", "city"], string());
/// let input = json!({"address": {"city": "Oslo"}});
/// assert_eq!(city.decode_value(&input), Ok("Oslo".to_string()));
///
/// let err = city.decode_value(&json!({"address": {}})).unwrap_err();
/// assert!(err.message().contains(r#"["address","city"]"#));
/// ```
#[must_use]
pub fn at<A, P, S>(path: P, inner: Decoder<A>) -> Decoder<A>
where
    A: 'static,
    P: IntoIterator<Item = S>,
    S: Into<PathSegment>,
{
    let path: Vec<PathSegment> = path.into_iter().map(Into::into).collect();
    Decoder::new(move |value| {
        if value.is_null() {
            return Err(DecodeError::new(
                "I found an error. Could not apply 'at' path to an undefined or null value.",
            ));
        }
        let mut current = value;
        for (idx, segment) in path.iter().enumerate() {
            let next = match (segment, current) {
                (PathSegment::Key(key), Value::Object(map)) => map.get(key),
                (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
                _ => None,
            };
            current = match next {
                Some(v) if !v.is_null() => v,
                _ => {
                    let prefix: Vec<Value> =
                        path[..=idx].iter().map(PathSegment::to_value).collect();
                    return Err(DecodeError::new(format!(
                        "I found an error in the 'at' path. I could not find path '{}' in {}",
                        stringify(&Value::Array(prefix)),
                        stringify(value)
                    )));
                }
            };
        }
        inner.decode_value(current)
    })
}

/// Makes any decoder optional. **Never fails.**
///
/// Any failure of `inner` — including a genuine shape mismatch, not just an
/// absent value — is swallowed and becomes `Ok(None)`. That masking is the
/// documented behaviour of this combinator, and the reason to prefer
/// [`nullable`] when a decoding error should still surface:
///
/// ```rust
/// use json_decode::{maybe, nullable, number};
/// use serde_json::{json, Value};
///
/// // maybe: absent and wrong-shape both collapse to None
/// assert_eq!(maybe(number()).decode_value(&json!(3)), Ok(Some(3.0)));
/// assert_eq!(maybe(number()).decode_value(&Value::Null), Ok(None));
/// assert_eq!(maybe(number()).decode_value(&json!("oops")), Ok(None));
///
/// // nullable: only null collapses to None; a wrong shape is still an error
/// assert_eq!(nullable(number()).decode_value(&Value::Null), Ok(None));
/// assert!(nullable(number()).decode_value(&json!("oops")).is_err());
/// ```
#[must_use]
pub fn maybe<A>(inner: Decoder<A>) -> Decoder<Option<A>>
where
    A: 'static,
{
    Decoder::new(move |value| match inner.decode_value(value) {
        Ok(v) => Ok(Some(v)),
        Err(_) => Ok(None),
    })
}

/// Decodes a possibly-null value.
///
/// Null input succeeds with `None`. Any other input is handed to `inner`;
/// its failures propagate instead of being masked, which is the difference
/// from [`maybe`].
///
/// # Examples
///
/// ```rust
/// use json_decode::{nullable, string};
/// use serde_json::{json, Value};
///
/// let opt = nullable(string());
/// assert_eq!(opt.decode_value(&json!("hi")), Ok(Some("hi".to_string())));
/// assert_eq!(opt.decode_value(&Value::Null), Ok(None));
/// assert!(opt.decode_value(&json!(42)).is_err());
/// ```
#[must_use]
pub fn nullable<A>(inner: Decoder<A>) -> Decoder<Option<A>>
where
    A: 'static,
{
    Decoder::new(move |value| {
        if value.is_null() {
            return Ok(None);
        }
        inner.decode_value(value).map(Some)
    })
}

/// Tries each decoder against the same input, in order; the first success
/// wins.
///
/// An empty list fails immediately. If every alternative fails, the final
/// diagnostic lists each alternative's failure on its own line, in the order
/// tried.
///
/// # Examples
///
/// ```rust
/// use json_decode::{number, one_of, string};
/// use serde_json::json;
///
/// let id = one_of(vec![
///     string(),
///     number().map(|n| n.to_string()),
/// ]);
/// assert_eq!(id.decode_value(&json!("abc")), Ok("abc".to_string()));
/// assert_eq!(id.decode_value(&json!(7)), Ok("7".to_string()));
///
/// let err = id.decode_value(&json!(true)).unwrap_err();
/// assert!(err.message().starts_with("I found the following problems:"));
/// ```
#[must_use]
pub fn one_of<A>(decoders: Vec<Decoder<A>>) -> Decoder<A>
where
    A: 'static,
{
    Decoder::new(move |value| {
        if decoders.is_empty() {
            return Err(DecodeError::new("No decoders specified."));
        }
        let mut problems = Vec::with_capacity(decoders.len());
        for decoder in &decoders {
            match decoder.decode_value(value) {
                Ok(v) => return Ok(v),
                Err(e) => problems.push(e.into_message()),
            }
        }
        Err(DecodeError::new(format!(
            "I found the following problems:\n{}",
            problems.join("\n")
        )))
    })
}

/// Decodes every member of a JSON object into `(key, value)` pairs, in the
/// object's own key order.
///
/// Arrays and null are rejected, not treated as empty objects. Decoding is
/// fail-fast: the first member failure stops the walk.
///
/// # Examples
///
/// ```rust
/// use json_decode::{key_value_pairs, number};
/// use serde_json::json;
///
/// let pairs = key_value_pairs(number());
/// assert_eq!(
///     pairs.decode_value(&json!({"b": 2, "a": 1})),
///     Ok(vec![("b".to_string(), 2.0), ("a".to_string(), 1.0)])
/// );
///
/// let err = pairs.decode_value(&json!({"a": "x"})).unwrap_err();
/// assert!(err.message().contains("Key 'a' failed to decode"));
/// ```
#[must_use]
pub fn key_value_pairs<A>(inner: Decoder<A>) -> Decoder<Vec<(String, A)>>
where
    A: 'static,
{
    Decoder::new(move |value| {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(DecodeError::new(format!(
                    "Expected to find an object and instead found '{}'",
                    stringify(other)
                )))
            }
        };
        let mut pairs = Vec::with_capacity(map.len());
        for (key, member) in map {
            match inner.decode_value(member) {
                Ok(v) => pairs.push((key.clone(), v)),
                Err(e) => {
                    return Err(DecodeError::new(format!(
                        "Key '{key}' failed to decode: {e}"
                    )))
                }
            }
        }
        Ok(pairs)
    })
}

/// Decodes a JSON object into an insertion-ordered map of decoded values.
///
/// Built on [`key_value_pairs`]; the resulting [`IndexMap`] iterates in the
/// object's own key order, and a duplicate key overwrites the earlier value.
///
/// Prefer explicit [`field`] decoders when the shape of the object is known;
/// `dict` is for genuinely open-ended keys.
///
/// # Examples
///
/// ```rust
/// use json_decode::{dict, number};
/// use serde_json::json;
///
/// let scores = dict(number()).decode_value(&json!({"a": 1, "b": 2})).unwrap();
/// assert_eq!(scores.get("a"), Some(&1.0));
/// assert_eq!(scores.get("b"), Some(&2.0));
/// ```
#[must_use]
pub fn dict<A>(inner: Decoder<A>) -> Decoder<IndexMap<String, A>>
where
    A: 'static,
{
    key_value_pairs(inner).map(|pairs| pairs.into_iter().collect())
}

fn expected(kind: &str, found: &Value) -> DecodeError {
    DecodeError::new(format!(
        "I expected to find a {kind} but instead I found {}",
        stringify(found)
    ))
}
