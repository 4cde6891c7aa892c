//! Probe Integration Tests
//!
//! Runs the prober end to end against a mock gateway on an ephemeral port,
//! covering the success path and every failure kind.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use pingcheck::{ProbeConfig, ProbeError, Prober};
use serde_json::json;
use tokio::net::TcpListener;

// =============================================================================
// Test Helpers
// =============================================================================

/// Bind an ephemeral local port.
///
/// Returns `None` in sandboxed environments that disallow binding, so
/// callers can skip the test.
async fn bind_local() -> Option<TcpListener> {
    match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => Some(listener),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => None,
        Err(e) => panic!("Failed to bind test listener: {e}"),
    }
}

/// Start a mock gateway serving the given router; returns its address.
async fn start_gateway(router: Router) -> Option<SocketAddr> {
    let listener = bind_local().await?;
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give the server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    Some(addr)
}

/// Probe configuration pointed at a mock gateway.
fn config_for(addr: SocketAddr) -> ProbeConfig {
    ProbeConfig::new(addr.ip().to_string(), addr.port()).with_timeout(Duration::from_secs(1))
}

/// Router answering `/ping` with a healthy pong payload.
fn pong_router() -> Router {
    Router::new().route(
        "/ping",
        get(|| async { axum::Json(json!({"message": "pong"})) }),
    )
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_probe_healthy_gateway() {
    let Some(addr) = start_gateway(pong_router()).await else {
        return;
    };

    let prober = Prober::new(config_for(addr)).unwrap();
    let result = prober.probe().await;

    assert!(result.success);
    assert_eq!(result.message, "health check passed");
}

#[tokio::test]
async fn test_probe_is_idempotent() {
    let Some(addr) = start_gateway(pong_router()).await else {
        return;
    };

    let prober = Prober::new(config_for(addr)).unwrap();
    let first = prober.probe().await;
    let second = prober.probe().await;

    assert_eq!(first.success, second.success);
    assert_eq!(first.message, second.message);
}

// =============================================================================
// Failure Kinds
// =============================================================================

#[tokio::test]
async fn test_probe_bad_status() {
    let router = Router::new().route(
        "/ping",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "unavailable") }),
    );
    let Some(addr) = start_gateway(router).await else {
        return;
    };

    let prober = Prober::new(config_for(addr)).unwrap();
    let err = prober.check().await.unwrap_err();

    assert!(matches!(err, ProbeError::BadStatus(503)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_probe_wrong_payload() {
    let router = Router::new().route(
        "/ping",
        get(|| async { axum::Json(json!({"message": "other"})) }),
    );
    let Some(addr) = start_gateway(router).await else {
        return;
    };

    let prober = Prober::new(config_for(addr)).unwrap();
    let err = prober.check().await.unwrap_err();

    assert!(matches!(err, ProbeError::UnexpectedPayload(_)));
}

#[tokio::test]
async fn test_probe_missing_payload_field() {
    let router = Router::new().route(
        "/ping",
        get(|| async { axum::Json(json!({"status": "ok"})) }),
    );
    let Some(addr) = start_gateway(router).await else {
        return;
    };

    let prober = Prober::new(config_for(addr)).unwrap();
    let err = prober.check().await.unwrap_err();

    assert!(matches!(err, ProbeError::UnexpectedPayload(_)));
}

#[tokio::test]
async fn test_probe_non_json_body() {
    let router = Router::new().route("/ping", get(|| async { "pong" }));
    let Some(addr) = start_gateway(router).await else {
        return;
    };

    let prober = Prober::new(config_for(addr)).unwrap();
    let err = prober.check().await.unwrap_err();

    assert!(matches!(err, ProbeError::InvalidJson(_)));
}

#[tokio::test]
async fn test_probe_timeout() {
    let Some(listener) = bind_local().await else {
        return;
    };
    let addr = listener.local_addr().unwrap();

    // Accept connections and hold them open without ever responding.
    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        }
    });

    let prober = Prober::new(config_for(addr)).unwrap();
    let err = prober.check().await.unwrap_err();

    assert!(matches!(err, ProbeError::Timeout(_)));
    assert!(err.to_string().contains("1s"));
}

#[tokio::test]
async fn test_probe_connection_refused() {
    // Bind and drop a listener to find a port with nothing listening.
    let Some(listener) = bind_local().await else {
        return;
    };
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let prober = Prober::new(config_for(addr)).unwrap();
    let err = prober.check().await.unwrap_err();

    assert!(matches!(err, ProbeError::ConnectionRefused(_)));
    assert!(
        err.to_string()
            .contains(&format!("{}:{}", addr.ip(), addr.port()))
    );
}

#[tokio::test]
async fn test_probe_failure_message_prefix() {
    let Some(listener) = bind_local().await else {
        return;
    };
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let prober = Prober::new(config_for(addr)).unwrap();
    let result = prober.probe().await;

    assert!(!result.success);
    assert!(result.message.starts_with("health check failed: "));
}
