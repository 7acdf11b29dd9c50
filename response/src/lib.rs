//! JSON response envelopes with a permissive CORS header, for handlers that
//! answer API Gateway proxy integrations.
//!
//! ```
//! use serde_json::json;
//!
//! let envelope = response::ok(&json!({ "hero": "batman" })).unwrap();
//! assert_eq!(envelope.status_code(), 200);
//! assert_eq!(envelope.body(), r#"{"hero":"batman"}"#);
//! ```

mod body;
mod envelope;
mod error;
mod transport;

pub use envelope::{ResponseEnvelope, ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN, DEFAULT_STATUS};
pub use error::{ConversionError, EncodingError, ErrorBody};

use serde::Serialize;
use serde_json::{Map, Value};

/// Formats `body` into an envelope with the given status.
///
/// A null body (unit, `None`, `Value::Null`) yields an empty body string. An
/// object with a truthy `stack` field is reduced to that field. Anything else
/// is encoded as-is. The status is passed through without validation.
pub fn format<T>(body: &T, status: i64) -> Result<ResponseEnvelope, EncodingError>
where
    T: Serialize + ?Sized,
{
    Ok(ResponseEnvelope::new(status, body::resolve(body)?))
}

/// Formats `body` with the default status `200`.
pub fn json<T>(body: &T) -> Result<ResponseEnvelope, EncodingError>
where
    T: Serialize + ?Sized,
{
    format(body, DEFAULT_STATUS)
}

/// Envelope for a missing body: an empty object, encoded as `{}`.
pub fn empty(status: i64) -> ResponseEnvelope {
    let body = Value::Object(Map::new());
    ResponseEnvelope::new(status, body.to_string())
}

pub fn ok<T>(body: &T) -> Result<ResponseEnvelope, EncodingError>
where
    T: Serialize + ?Sized,
{
    format(body, 200)
}

pub fn bad_request<T>(body: &T) -> Result<ResponseEnvelope, EncodingError>
where
    T: Serialize + ?Sized,
{
    format(body, 400)
}

pub fn server_error<T>(body: &T) -> Result<ResponseEnvelope, EncodingError>
where
    T: Serialize + ?Sized,
{
    format(body, 500)
}

/// Formats an error as its stack text, see [`ErrorBody::from_error`].
pub fn error<E>(err: &E, status: i64) -> Result<ResponseEnvelope, EncodingError>
where
    E: std::error::Error + ?Sized,
{
    format(&ErrorBody::from_error(err), status)
}
