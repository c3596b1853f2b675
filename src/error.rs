//! Decoding diagnostics.
//!
//! Every failure a decoder can produce is a plain-text diagnostic: the
//! message names what was expected, where in the input the problem sits, and
//! a rendering of the offending value. There are no structured error codes —
//! the taxonomy lives in the message text itself:
//!
//! - **Shape mismatch**: "I expected to find a number but instead I found ..."
//! - **Missing field/path**: "I expected to find an object with key 'x' ..."
//! - **Nested failure**: positional context (array index, field name) wraps
//!   the inner diagnostic without discarding it
//! - **Aggregate failure**: [`one_of`](crate::one_of) concatenates every
//!   branch diagnostic
//! - **Parse failure**: the `serde_json` parser message, unmodified
//!
//! ## Examples
//!
//! ```rust
//! use json_decode::{number, DecodeError};
//! use serde_json::json;
//!
//! let err: DecodeError = number().decode_value(&json!("nope")).unwrap_err();
//! assert!(err.message().contains("expected to find a number"));
//! ```

use thiserror::Error;

/// A plain-text diagnostic describing where and why decoding failed.
///
/// Context accumulates as a failure propagates outward: structural decoders
/// such as [`array`](crate::array) and [`field`](crate::field) prefix the
/// failing index or key onto the inner message, so the final text reads as a
/// path from the top of the input down to the offending value.
///
/// # Examples
///
/// ```rust
/// use json_decode::{array, number};
/// use serde_json::json;
///
/// let err = array(number()).decode_value(&json!([1, "two"])).unwrap_err();
/// assert!(err.message().contains("at [1]"));
/// assert!(err.message().contains("expected to find a number"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DecodeError(String);

impl DecodeError {
    /// Creates a diagnostic from any message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_decode::DecodeError;
    ///
    /// let err = DecodeError::new("missing discriminator");
    /// assert_eq!(err.message(), "missing discriminator");
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        DecodeError(message.into())
    }

    /// Borrows the diagnostic text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// Consumes the error, returning the diagnostic text.
    #[must_use]
    pub fn into_message(self) -> String {
        self.0
    }
}

impl From<String> for DecodeError {
    fn from(message: String) -> Self {
        DecodeError(message)
    }
}

impl From<&str> for DecodeError {
    fn from(message: &str) -> Self {
        DecodeError(message.to_string())
    }
}

/// The outcome of running a decoder: a typed value or a diagnostic.
pub type DecodeResult<A> = Result<A, DecodeError>;
