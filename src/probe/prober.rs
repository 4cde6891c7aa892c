//! Single-shot HTTP liveness probe.
//!
//! Issues one GET against the gateway ping endpoint and classifies the
//! outcome: status and payload checks on a response, timeout / refused /
//! transport classification on the way there.

use std::error::Error;
use std::time::Instant;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::time::timeout;

use crate::config::ProbeConfig;
use crate::probe::ProbeError;

/// Payload marker expected from a healthy gateway.
const EXPECTED_MESSAGE: &str = "pong";

/// Outcome of a single probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// Whether the gateway passed the probe.
    pub success: bool,
    /// Human-readable outcome, printed verbatim by the binary.
    pub message: String,
}

impl ProbeResult {
    fn pass() -> Self {
        Self {
            success: true,
            message: "health check passed".to_string(),
        }
    }

    fn fail(err: &ProbeError) -> Self {
        Self {
            success: false,
            message: format!("health check failed: {err}"),
        }
    }
}

/// Single-shot gateway liveness prober.
///
/// Holds the HTTP client built from the probe configuration. The client
/// keeps no idle connections: each run opens one connection, and dropping
/// the response releases it on every exit path.
pub struct Prober {
    config: ProbeConfig,
    client: Client,
}

impl Prober {
    /// Create a prober for the given configuration.
    ///
    /// # Errors
    /// Returns `ProbeError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        // One-shot probe; no idle pool.
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ProbeError::Transport)?;

        Ok(Self { config, client })
    }

    /// Run the probe and fold the outcome into a [`ProbeResult`].
    pub async fn probe(&self) -> ProbeResult {
        match self.check().await {
            Ok(()) => ProbeResult::pass(),
            Err(e) => ProbeResult::fail(&e),
        }
    }

    /// Perform the probe, surfacing the failure kind.
    ///
    /// # Errors
    /// Returns the first failure in the sequence: `Timeout`,
    /// `ConnectionRefused` or `Transport` while connecting and sending,
    /// `BadStatus` for a non-200 response, `InvalidJson` for an
    /// unparseable body, `UnexpectedPayload` for a wrong marker.
    pub async fn check(&self) -> Result<(), ProbeError> {
        let url = self.config.url();
        let probe_timeout = self.config.timeout;

        // Measure request time; the client timeout covers the request
        // itself, the outer timeout bounds the whole await.
        let start = Instant::now();
        let result = timeout(probe_timeout, self.client.get(&url).send()).await;
        let elapsed = start.elapsed();

        let response = match result {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(url = %url, error = %e, "probe request failed");
                return Err(self.classify_send_error(e));
            }
            Err(_) => {
                tracing::warn!(
                    url = %url,
                    timeout_s = probe_timeout.as_secs(),
                    "probe timed out"
                );
                return Err(ProbeError::Timeout(probe_timeout));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                "probe returned unexpected status"
            );
            return Err(ProbeError::BadStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(ProbeError::Transport)?;
        validate_payload(&body)?;

        tracing::debug!(
            url = %url,
            latency_ms = elapsed.as_secs_f64() * 1000.0,
            "probe successful"
        );
        Ok(())
    }

    /// Map a send error onto the probe failure taxonomy.
    fn classify_send_error(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            return ProbeError::Timeout(self.config.timeout);
        }
        if is_connection_refused(&err) {
            return ProbeError::ConnectionRefused(self.config.target());
        }
        ProbeError::Transport(err)
    }
}

/// Walk the error source chain looking for a refused connection.
fn is_connection_refused(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

/// Check that the body is JSON carrying `{"message": "pong"}`.
fn validate_payload(body: &str) -> Result<(), ProbeError> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(ProbeError::InvalidJson)?;

    match json.get("message").and_then(serde_json::Value::as_str) {
        Some(EXPECTED_MESSAGE) => Ok(()),
        Some(other) => Err(ProbeError::UnexpectedPayload(format!(
            "message field was {other:?}"
        ))),
        None => Err(ProbeError::UnexpectedPayload(
            "message field missing".to_string(),
        )),
    }
}
