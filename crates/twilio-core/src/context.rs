//! Per-client execution context.
//!
//! The context travels with every request a client issues. Transport
//! providers receive it when handing out an HTTP client, and its timeout is
//! applied to each request. Cancellation is expressed by dropping the request
//! future.

use std::time::Duration;
use uuid::Uuid;

/// Execution context threaded through to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
    timeout: Option<Duration>,
}

impl RequestContext {
    /// Create a context with a fresh request id and no timeout override.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            timeout: None,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the request id reported in logs.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Request id reported in logs.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Per-request timeout, if one was set.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_has_unique_id() {
        let a = RequestContext::new();
        let b = RequestContext::new();
        assert_ne!(a.request_id(), b.request_id());
        assert!(Uuid::parse_str(a.request_id()).is_ok());
        assert!(a.timeout().is_none());
    }

    #[test]
    fn test_context_builder() {
        let ctx = RequestContext::new()
            .with_timeout(Duration::from_secs(5))
            .with_request_id("job-42");
        assert_eq!(ctx.request_id(), "job-42");
        assert_eq!(ctx.timeout(), Some(Duration::from_secs(5)));
    }
}
