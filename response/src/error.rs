use serde::Serialize;
use std::error::Error as StdError;
use thiserror::Error;

/// The body, or its `stack` field, could not be encoded as JSON text.
#[derive(Debug, Error)]
#[error("failed to encode response body as JSON: {0}")]
pub struct EncodingError(#[from] serde_json::Error);

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("status code {0} cannot be represented as an HTTP status")]
    InvalidStatus(i64),
    #[error("failed to render response: {0}")]
    Http(#[from] lambda_http::http::Error),
}

/// Error-like body carrying a `stack`, so formatting it sends the stack text
/// instead of the whole object.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub stack: String,
}

impl ErrorBody {
    /// Renders `err` and its chain of sources, one per line.
    pub fn from_error<E>(err: &E) -> ErrorBody
    where
        E: StdError + ?Sized,
    {
        let message = err.to_string();
        let mut stack = message.clone();
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\ncaused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        ErrorBody { message, stack }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct ScanError {
        source: Option<Box<dyn StdError + Send + Sync>>,
    }

    impl StdError for ScanError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_ref().map(|e| e.as_ref() as &(dyn StdError + 'static))
        }
    }

    impl fmt::Display for ScanError {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "Scan of league table failed!")
        }
    }

    #[test]
    fn error_body_without_source() {
        let body = ErrorBody::from_error(&ScanError { source: None });
        assert_eq!(body.message, "Scan of league table failed!");
        assert_eq!(body.stack, "Scan of league table failed!");
    }

    #[test]
    fn error_body_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connection timed out");
        let err = ScanError {
            source: Some(Box::new(io)),
        };
        let body = ErrorBody::from_error(&err);
        assert_eq!(
            body.stack,
            "Scan of league table failed!\ncaused by: connection timed out"
        );
    }

    #[test]
    fn encoding_error_keeps_serde_source() {
        let err: EncodingError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("failed to encode response body as JSON"));
        assert!(err.source().is_some());
    }
}
