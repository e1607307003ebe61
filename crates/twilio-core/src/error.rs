//! Error types for Twilio REST operations.
//!
//! This module classifies every way a request can fail: the transport could not
//! deliver it, the body could not be read, the server answered 500, or the API
//! answered with a structured error document.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Message reported for HTTP 500 responses.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Main error type for Twilio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request could not be built or sent
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The response body could not be fully read
    #[error("Failed to read response body: {message}")]
    Read {
        /// Bytes received before the failure
        body: Vec<u8>,
        /// Underlying read error
        message: String,
    },

    /// The server answered with HTTP 500
    #[error("Server Error")]
    ServerError {
        /// Raw response body
        body: Vec<u8>,
    },

    /// The API answered with a structured error document
    #[error("{error}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Decoded error document
        error: ApiError,
        /// Raw response body
        body: Vec<u8>,
    },

    /// The API answered with a non-success status and a body that is not an error document
    #[error("Malformed error body (HTTP {status}): {reason}")]
    MalformedErrorBody {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body
        body: Vec<u8>,
        /// Decoder failure description
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Specialized result type for Twilio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error document returned by the Twilio API on non-success responses.
///
/// Only `message` is guaranteed; the other fields are filled in when the API
/// sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Human-readable error message
    #[serde(default)]
    pub message: String,

    /// Twilio error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    /// Link to the error code documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,

    /// HTTP status echoed in the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an error document carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Decode an error document from a response body.
    ///
    /// # Errors
    ///
    /// Returns the JSON decoder error when the body is not a JSON object.
    pub fn from_slice(body: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl Error {
    /// Classify a non-success response into the matching error variant.
    ///
    /// 500 maps to [`Error::ServerError`]; anything else is decoded as an
    /// [`ApiError`] document.
    #[must_use]
    pub fn from_status(status: u16, body: Vec<u8>) -> Self {
        if status == 500 {
            return Self::ServerError { body };
        }

        match ApiError::from_slice(&body) {
            Ok(error) => Self::Api {
                status,
                error,
                body,
            },
            Err(err) => Self::MalformedErrorBody {
                status,
                body,
                reason: err.to_string(),
            },
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Read { .. } => "READ_ERROR",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::MalformedErrorBody { .. } => "MALFORMED_ERROR_BODY",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }

    /// Response body carried by the error, if a response was received.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Read { body, .. }
            | Self::ServerError { body }
            | Self::Api { body, .. }
            | Self::MalformedErrorBody { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status of the response that produced this error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { .. } => Some(500),
            Self::Api { status, .. } | Self::MalformedErrorBody { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded API error document, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_server_error_display() {
        let err = Error::from_status(500, b"<html>oops</html>".to_vec());
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);
        assert_eq!(err.body(), Some(&b"<html>oops</html>"[..]));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_api_error_decoded() {
        let body = br#"{"code":21211,"message":"Invalid number","more_info":"https://www.twilio.com/docs/errors/21211","status":400}"#;
        let err = Error::from_status(400, body.to_vec());

        let api = err.api_error().expect("api error");
        assert_eq!(api.message, "Invalid number");
        assert_eq!(api.code, Some(21211));
        assert_eq!(api.status, Some(400));
        assert_eq!(err.to_string(), "Invalid number");
        assert_eq!(err.error_code(), "API_ERROR");
    }

    #[test]
    fn test_api_error_missing_fields() {
        let err = Error::from_status(404, b"{}".to_vec());
        assert_eq!(err.api_error(), Some(&ApiError::default()));
    }

    #[test]
    fn test_malformed_error_body() {
        let err = Error::from_status(403, b"Forbidden".to_vec());
        match &err {
            Error::MalformedErrorBody { status, body, .. } => {
                assert_eq!(*status, 403);
                assert_eq!(body, b"Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.api_error().is_none());
    }

    #[test]
    fn test_read_error_keeps_partial_body() {
        let err = Error::Read {
            body: b"{\"par".to_vec(),
            message: "connection reset".to_string(),
        };
        assert_eq!(err.body(), Some(&b"{\"par"[..]));
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Failed to read response body: connection reset"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::Transport("x".to_string()).error_code(),
            "TRANSPORT_ERROR"
        );
        assert_eq!(Error::Timeout("x".to_string()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::ServerError { body: Vec::new() }.error_code(),
            "SERVER_ERROR"
        );
        assert_eq!(
            Error::ConfigError("x".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("x".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
        assert_eq!(
            Error::ValidationError("x".to_string()).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let twilio_err: Error = err.into();
        assert!(matches!(twilio_err, Error::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn test_from_reqwest_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = client.get(server.uri()).send().await.unwrap_err();
        let twilio_err: Error = err.into();
        assert!(matches!(twilio_err, Error::Timeout(_)));
    }

    #[tokio::test]
    async fn test_from_reqwest_connect_failure() {
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        let twilio_err: Error = err.into();
        assert!(matches!(twilio_err, Error::Transport(_)));
    }
}
