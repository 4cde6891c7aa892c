//! Pingcheck Binary Entry Point
//!
//! Performs one liveness probe against the local inference gateway and
//! exits 0 on success, 1 on any failure. Core functionality is provided
//! by the `pingcheck` library crate.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use pingcheck::{ProbeConfig, Prober};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pingcheck - Inference Gateway Liveness Probe
#[derive(Parser, Debug)]
#[command(name = "pingcheck", version, about, long_about = None)]
struct Cli {
    /// Gateway host (overrides HEALTH_CHECK_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Gateway port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Probe timeout in seconds (overrides HEALTH_CHECK_TIMEOUT)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries the single outcome line.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,pingcheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match ProbeConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e.to_string()),
    };

    // Apply CLI overrides (CLI > ENV > default)
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = Duration::from_secs(timeout);
    }

    if let Err(e) = config.validate() {
        return fail(&e.to_string());
    }

    tracing::info!(
        gateway = %config.target(),
        timeout_s = config.timeout.as_secs(),
        "probing gateway"
    );

    let prober = match Prober::new(config) {
        Ok(prober) => prober,
        Err(e) => return fail(&e.to_string()),
    };

    let result = prober.probe().await;
    println!("{}", result.message);

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print a failure line and select the failure exit code.
fn fail(reason: &str) -> ExitCode {
    println!("health check failed: {reason}");
    ExitCode::FAILURE
}
