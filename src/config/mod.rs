//! Configuration module for the pingcheck binary.
//!
//! Provides environment-based configuration loading and validation for:
//! - Probe target (host, port)
//! - Probe timeout
//! - Ping endpoint path

mod probe;

pub use probe::{ConfigError, ProbeConfig};

// Re-export constants
pub use probe::{DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use probe::{HOST_ENV, PORT_ENV, TIMEOUT_ENV};
