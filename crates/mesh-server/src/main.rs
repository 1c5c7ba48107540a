//! `mesh-server` binary: reads configuration from the environment, wires
//! an `AuditRepository` to the resolver, and shuts down cleanly on
//! `SIGINT` (§6.3).
//!
//! No transport is wired up here yet -- `mesh_server::Transport` is an
//! interface only (§6.1 Non-goal). This binary establishes the process
//! lifecycle a concrete transport would be driven from.

use std::process::ExitCode;

use mesh_audit::{AuditRepository, InMemoryAuditRepository};
use mesh_server::ServerConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(%err, "failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(config))
}

async fn run(config: ServerConfig) -> ExitCode {
    tracing::info!(port = config.port, db_path = %config.db_path.display(), "mesh-server starting");

    // A real deployment opens the durable store at `config.db_path`; the
    // in-memory reference implementation ignores it (§4.6, §6.2 is
    // interface-only until a transactional store is wired in).
    let mut repository = InMemoryAuditRepository::new();

    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");

    tracing::info!("shutdown signal received, closing repository");
    match repository.close() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "failed to close repository cleanly");
            ExitCode::FAILURE
        }
    }
}
