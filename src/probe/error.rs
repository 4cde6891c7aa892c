//! Probe failure taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during a probe.
///
/// Every kind is terminal for the single attempt; the binary collapses
/// all of them into exit code 1.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No response within the configured timeout.
    #[error("no response within {}s", .0.as_secs())]
    Timeout(Duration),

    /// The target actively refused the connection.
    #[error("connection refused by {0}")]
    ConnectionRefused(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response status was not 200.
    #[error("unexpected status code {0}")]
    BadStatus(u16),

    /// The response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The response parsed but the payload marker was wrong or missing.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_includes_value() {
        let err = ProbeError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "no response within 5s");
    }

    #[test]
    fn test_connection_refused_display_includes_target() {
        let err = ProbeError::ConnectionRefused("localhost:8080".to_string());
        assert_eq!(err.to_string(), "connection refused by localhost:8080");
    }

    #[test]
    fn test_bad_status_display_includes_code() {
        let err = ProbeError::BadStatus(503);
        assert_eq!(err.to_string(), "unexpected status code 503");
    }
}
