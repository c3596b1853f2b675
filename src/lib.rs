//! # json_decode
//!
//! Composable decoders that turn untyped JSON into strongly-typed Rust
//! values, producing either the typed result or a human-readable diagnostic
//! describing exactly where and why decoding failed.
//!
//! ## Why decoders?
//!
//! `serde` derive is the right tool when your types mirror the JSON exactly.
//! Decoders shine when they don't: versioned payloads, discriminated unions,
//! lenient inputs, values buried at a path, or APIs whose shape you want to
//! validate piece by piece with precise error messages.
//!
//! ## Key Features
//!
//! - **Composable**: build decoders for whole documents out of decoders for
//!   scalars and fields, with `map`, `and_then`, `assign`, and `or_else`
//! - **Readable Diagnostics**: every failure names what was expected, where
//!   it happened, and the offending value
//! - **Total**: decoding never panics; malformed JSON text becomes an
//!   ordinary error value
//! - **Reusable**: decoders are immutable, cheaply cloneable, `Send + Sync`
//!   values you can share across threads and decode calls
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! json_decode = "0.1"
//! serde_json = "1.0"
//! ```
//!
//! ### Decoding a document
//!
//! ```rust
//! use json_decode::{array, field, string, succeed, number};
//! use serde::Deserialize;
//! use serde_json::Value;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct User {
//!     name: String,
//!     age: f64,
//!     tags: Vec<String>,
//! }
//!
//! let user = succeed(Value::Null)
//!     .assign("name", field("name", string()))
//!     .assign("age", field("age", number()))
//!     .assign("tags", field("tags", array(string())))
//!     .materialize::<User>();
//!
//! let json = r#"{"name": "Ada", "age": 36, "tags": ["math", "engines"]}"#;
//! let decoded = user.decode_json(json).unwrap();
//! assert_eq!(decoded.name, "Ada");
//! assert_eq!(decoded.tags.len(), 2);
//! ```
//!
//! ### Diagnostics
//!
//! ```rust
//! use json_decode::{array, field, number};
//! use serde_json::json;
//!
//! let ports = field("ports", array(number()));
//! let err = ports.decode_value(&json!({"ports": [80, "http"]})).unwrap_err();
//!
//! // "I found an error in the field named 'ports' of {...}:
//! //  I found an error in the array at [1]:
//! //  I expected to find a number but instead I found \"http\""
//! assert!(err.message().contains("'ports'"));
//! assert!(err.message().contains("at [1]"));
//! ```
//!
//! ### Versioned payloads with `and_then`
//!
//! `and_then` re-runs the chosen decoder against the **original input**, so a
//! discriminator field can select a decoder for the whole document:
//!
//! ```rust
//! use json_decode::{field, number, string};
//! use serde_json::json;
//!
//! let body = field("version", number()).and_then(|v| {
//!     if v >= 2.0 {
//!         field("payload", string())
//!     } else {
//!         field("data", string())
//!     }
//! });
//!
//! assert_eq!(
//!     body.decode_value(&json!({"version": 2, "payload": "x"})),
//!     Ok("x".to_string())
//! );
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API: every failure is a returned [`DecodeError`]
//! - Decoders never mutate shared state; running one is a pure function of
//!   its input

pub mod decoder;
pub mod error;
pub mod macros;
pub mod path;
pub mod primitives;
pub mod stringify;

pub use decoder::Decoder;
pub use error::{DecodeError, DecodeResult};
pub use path::PathSegment;
pub use primitives::{
    array, at, boolean, date, dict, fail, field, key_value_pairs, maybe, nullable, number, one_of,
    string, succeed,
};
