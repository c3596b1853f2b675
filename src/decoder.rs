//! The decoder abstraction and its combinator algebra.
//!
//! A [`Decoder<A>`] wraps a pure function from an untyped [`Value`] to a
//! [`DecodeResult<A>`]. Combinators never run anything eagerly: each one
//! returns a new `Decoder` whose function closes over the original, so
//! decoders are immutable, cheap to clone, and safe to share across threads
//! and across any number of decode calls.
//!
//! ## Building a decoder pipeline
//!
//! ```rust
//! use json_decode::{array, field, string};
//! use serde_json::json;
//!
//! let names = field("users", array(field("name", string())));
//! let input = json!({"users": [{"name": "Ada"}, {"name": "Grace"}]});
//! assert_eq!(
//!     names.decode_value(&input),
//!     Ok(vec!["Ada".to_string(), "Grace".to_string()])
//! );
//! ```

use crate::error::{DecodeError, DecodeResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A reusable rule for converting an untyped [`Value`] into a typed value or
/// a failure diagnostic.
///
/// Decoders form an algebra: small decoders for scalars and fields combine
/// into decoders for whole documents via [`map`](Decoder::map),
/// [`and_then`](Decoder::and_then), [`assign`](Decoder::assign),
/// [`or_else`](Decoder::or_else) and the structural constructors in
/// [`primitives`](crate::primitives).
///
/// Running a decoder never mutates it and never panics; every input produces
/// exactly one outcome. Cloning is a reference-count bump.
///
/// # Examples
///
/// ```rust
/// use json_decode::{field, number};
/// use serde_json::json;
///
/// let port = field("port", number()).map(|n| n as u16);
/// assert_eq!(port.decode_value(&json!({"port": 8080})), Ok(8080));
/// assert!(port.decode_value(&json!({"port": "8080"})).is_err());
/// ```
pub struct Decoder<A> {
    run: Arc<dyn Fn(&Value) -> DecodeResult<A> + Send + Sync>,
}

impl<A> Clone for Decoder<A> {
    fn clone(&self) -> Self {
        Decoder {
            run: Arc::clone(&self.run),
        }
    }
}

impl<A: 'static> Decoder<A> {
    /// Wraps a decoding function in a `Decoder`.
    ///
    /// This is the escape hatch for shapes the built-in primitives do not
    /// cover. The function must be total: return a failure rather than
    /// panicking on unexpected input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{DecodeError, Decoder};
    /// use serde_json::{json, Value};
    ///
    /// let non_empty = Decoder::new(|value: &Value| match value {
    ///     Value::String(s) if !s.is_empty() => Ok(s.clone()),
    ///     other => Err(DecodeError::new(format!(
    ///         "I expected a non-empty string but instead I found {other}"
    ///     ))),
    /// });
    ///
    /// assert_eq!(non_empty.decode_value(&json!("hi")), Ok("hi".to_string()));
    /// assert!(non_empty.decode_value(&json!("")).is_err());
    /// ```
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&Value) -> DecodeResult<A> + Send + Sync + 'static,
    {
        Decoder { run: Arc::new(run) }
    }

    /// Runs the decoder on an already-untyped value.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] describing where and why decoding failed.
    pub fn decode_value(&self, value: &Value) -> DecodeResult<A> {
        (self.run)(value)
    }

    /// Parses `json` and runs the decoder on the resulting value.
    ///
    /// Parse errors are returned as an ordinary failure outcome carrying the
    /// parser's message; this method never panics on malformed text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{field, boolean};
    ///
    /// let flag = field("on", boolean());
    /// assert_eq!(flag.decode_json(r#"{"on": true}"#), Ok(true));
    /// assert!(flag.decode_json("{").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the text is not valid JSON or if the
    /// decoder fails on the parsed value.
    pub fn decode_json(&self, json: &str) -> DecodeResult<A> {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => self.decode_value(&value),
            Err(parse_err) => Err(DecodeError::new(parse_err.to_string())),
        }
    }

    /// Lifts a function into the decoder: on success the decoded value is
    /// transformed with `f`; failures pass through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::string;
    /// use serde_json::json;
    ///
    /// let shouty = string().map(|s| s.to_uppercase());
    /// assert_eq!(shouty.decode_value(&json!("hi")), Ok("HI".to_string()));
    /// ```
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Decoder<B>
    where
        B: 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Decoder::new(move |value| self.decode_value(value).map(|a| f(a)))
    }

    /// Chains decoders: on success with value `a`, the decoder returned by
    /// `f(a)` is run **against the same original input**, not against `a`.
    ///
    /// Re-decoding the original input is what makes discriminator patterns
    /// work: inspect a version or tag field, then pick a decoder for the
    /// whole document. On failure the chain short-circuits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{field, number, string};
    /// use serde_json::json;
    ///
    /// let body = field("version", number()).and_then(|version| {
    ///     if version >= 2.0 {
    ///         field("payload", string())
    ///     } else {
    ///         field("data", string())
    ///     }
    /// });
    ///
    /// let v2 = json!({"version": 2, "payload": "current"});
    /// let v1 = json!({"version": 1, "data": "legacy"});
    /// assert_eq!(body.decode_value(&v2), Ok("current".to_string()));
    /// assert_eq!(body.decode_value(&v1), Ok("legacy".to_string()));
    /// ```
    #[must_use]
    pub fn and_then<B, F>(self, f: F) -> Decoder<B>
    where
        B: 'static,
        F: Fn(A) -> Decoder<B> + Send + Sync + 'static,
    {
        Decoder::new(move |value| {
            self.decode_value(value)
                .and_then(|a| f(a).decode_value(value))
        })
    }

    /// Decodes one more member and merges it into a growing record.
    ///
    /// `assign` is a special case of [`and_then`](Decoder::and_then) for
    /// building objects without nested callbacks. The accumulated value is
    /// serialized; if it is object-shaped, `{key: member}` is merged into a
    /// shallow copy, otherwise the accumulator is replaced by an object
    /// containing only `key`. Finish a chain of `assign`s with
    /// [`materialize`](Decoder::materialize) to produce a typed struct.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{field, number, string, succeed};
    /// use serde_json::{json, Value};
    ///
    /// let record = succeed(Value::Null)
    ///     .assign("name", field("name", string()))
    ///     .assign("age", field("age", number()));
    ///
    /// let input = json!({"name": "Ada", "age": 36, "ignored": true});
    /// let built = record.decode_value(&input).unwrap();
    /// assert_eq!(built, json!({"name": "Ada", "age": 36.0}));
    /// ```
    #[must_use]
    pub fn assign<B>(self, key: impl Into<String>, member: Decoder<B>) -> Decoder<Value>
    where
        A: Serialize,
        B: Serialize + 'static,
    {
        let key = key.into();
        Decoder::new(move |value| {
            let scope = self.decode_value(value)?;
            let decoded = member.decode_value(value)?;
            merge_scope(&scope, &key, &decoded)
        })
    }

    /// Like [`assign`](Decoder::assign), but the member decoder is chosen by
    /// looking at the record built so far.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{field, string, succeed};
    /// use serde_json::{json, Value};
    ///
    /// let record = succeed(Value::Null)
    ///     .assign("name", field("name", string()))
    ///     .assign_with("greeting", |scope: &Value| {
    ///         let name = scope["name"].as_str().unwrap_or("there");
    ///         succeed(format!("hello, {name}"))
    ///     });
    ///
    /// let built = record.decode_value(&json!({"name": "Ada"})).unwrap();
    /// assert_eq!(built["greeting"], json!("hello, Ada"));
    /// ```
    #[must_use]
    pub fn assign_with<B, F>(self, key: impl Into<String>, f: F) -> Decoder<Value>
    where
        A: Serialize,
        B: Serialize + 'static,
        F: Fn(&A) -> Decoder<B> + Send + Sync + 'static,
    {
        let key = key.into();
        Decoder::new(move |value| {
            let scope = self.decode_value(value)?;
            let decoded = f(&scope).decode_value(value)?;
            merge_scope(&scope, &key, &decoded)
        })
    }

    /// Injects a side effect into the middle of a decoder chain, invoked on
    /// success only. The decoded value passes through unchanged.
    ///
    /// Handy for debugging pipelines with logging; not intended for anything
    /// heavier.
    #[must_use]
    pub fn inspect<F>(self, f: F) -> Decoder<A>
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.map(move |a| {
            f(&a);
            a
        })
    }

    /// Rewrites the diagnostic on failure; successes pass through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{number, DecodeError};
    /// use serde_json::json;
    ///
    /// let port = number()
    ///     .map_err(|e| DecodeError::new(format!("while reading the port: {e}")));
    /// let err = port.decode_value(&json!("oops")).unwrap_err();
    /// assert!(err.message().starts_with("while reading the port:"));
    /// ```
    #[must_use]
    pub fn map_err<F>(self, f: F) -> Decoder<A>
    where
        F: Fn(DecodeError) -> DecodeError + Send + Sync + 'static,
    {
        Decoder::new(move |value| self.decode_value(value).map_err(|e| f(e)))
    }

    /// On failure, decodes the **original input** again with the decoder
    /// returned by `f`; successes pass through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{number, string};
    /// use serde_json::json;
    ///
    /// let count = number().or_else(|_| string().map(|s| s.len() as f64));
    /// assert_eq!(count.decode_value(&json!(3)), Ok(3.0));
    /// assert_eq!(count.decode_value(&json!("abc")), Ok(3.0));
    /// ```
    #[must_use]
    pub fn or_else<F>(self, f: F) -> Decoder<A>
    where
        F: Fn(DecodeError) -> Decoder<A> + Send + Sync + 'static,
    {
        Decoder::new(move |value| {
            self.decode_value(value)
                .or_else(|e| f(e).decode_value(value))
        })
    }

    /// Injects a side effect invoked on failure only. The diagnostic passes
    /// through unchanged.
    #[must_use]
    pub fn inspect_err<F>(self, f: F) -> Decoder<A>
    where
        F: Fn(&DecodeError) + Send + Sync + 'static,
    {
        Decoder::new(move |value| {
            self.decode_value(value).map_err(|e| {
                f(&e);
                e
            })
        })
    }

    /// Converts the decoder into a standalone callable over untyped values.
    #[must_use]
    pub fn to_value_fn(self) -> impl Fn(&Value) -> DecodeResult<A> {
        move |value| self.decode_value(value)
    }

    /// Converts the decoder into a standalone callable over JSON text.
    #[must_use]
    pub fn to_json_fn(self) -> impl Fn(&str) -> DecodeResult<A> {
        move |json| self.decode_json(json)
    }
}

impl Decoder<Value> {
    /// Converts the finished record of an [`assign`](Decoder::assign) chain
    /// into any `T: DeserializeOwned`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::{field, number, string, succeed};
    /// use serde::Deserialize;
    /// use serde_json::Value;
    ///
    /// #[derive(Debug, Deserialize, PartialEq)]
    /// struct User {
    ///     name: String,
    ///     age: f64,
    /// }
    ///
    /// let user = succeed(Value::Null)
    ///     .assign("name", field("name", string()))
    ///     .assign("age", field("age", number()))
    ///     .materialize::<User>();
    ///
    /// let decoded = user.decode_json(r#"{"name": "Ada", "age": 36}"#).unwrap();
    /// assert_eq!(decoded, User { name: "Ada".to_string(), age: 36.0 });
    /// ```
    #[must_use]
    pub fn materialize<T>(self) -> Decoder<T>
    where
        T: DeserializeOwned + 'static,
    {
        Decoder::new(move |value| {
            let built = self.decode_value(value)?;
            serde_json::from_value(built).map_err(|e| DecodeError::new(e.to_string()))
        })
    }
}

/// Shallow-merges `{key: member}` into the serialized accumulator.
///
/// A non-object accumulator degenerates to an object containing only `key`.
fn merge_scope<A, B>(scope: &A, key: &str, member: &B) -> DecodeResult<Value>
where
    A: Serialize,
    B: Serialize,
{
    let mut object = match serde_json::to_value(scope) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let member = serde_json::to_value(member)
        .map_err(|e| DecodeError::new(format!("Key '{key}' could not be stored: {e}")))?;
    object.insert(key.to_string(), member);
    Ok(Value::Object(object))
}
