//! Gateway liveness probing.
//!
//! - [`Prober`]: single-shot HTTP GET probe against the gateway
//! - [`ProbeError`]: failure taxonomy for one probe attempt

mod error;
mod prober;

pub use error::ProbeError;
pub use prober::{ProbeResult, Prober};
