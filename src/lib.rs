//! Pingcheck - Inference Gateway Liveness Probe
//!
//! This crate performs a single health check against a local inference
//! gateway: one HTTP GET to the gateway's ping endpoint, validating the
//! response status and the JSON payload marker. It is meant to run as a
//! container or orchestrator liveness command; the `pingcheck` binary
//! prints one outcome line to stdout and exits 0 on success, 1 on failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use pingcheck::{ProbeConfig, Prober};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = ProbeConfig::from_env().expect("invalid environment");
//!     let prober = Prober::new(config).expect("failed to build prober");
//!
//!     let result = prober.probe().await;
//!     println!("{}", result.message);
//! }
//! ```

pub mod config;
pub mod probe;

pub use config::{ConfigError, ProbeConfig};
pub use probe::{ProbeError, ProbeResult, Prober};
