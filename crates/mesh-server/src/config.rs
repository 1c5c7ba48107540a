//! Process configuration (§6.3).
//!
//! `mesh-server` takes no flags: `PORT` and `DB_PATH` come from the
//! environment, and a missing or invalid value is a fail-fast
//! initialization error rather than a silently-applied default.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment-derived process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// TCP port the (not-yet-implemented) transport would bind.
    pub port: u16,
    /// Path to the audit repository's backing store.
    pub db_path: PathBuf,
}

impl ServerConfig {
    /// Read and validate configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is missing or not a valid `u16`, or if
    /// `DB_PATH` is missing or empty.
    pub fn from_env() -> Result<Self> {
        let port_raw = std::env::var("PORT").context("PORT environment variable is not set")?;
        let port: u16 = port_raw
            .parse()
            .with_context(|| format!("PORT {port_raw:?} is not a valid port number"))?;

        let db_path_raw = std::env::var("DB_PATH").context("DB_PATH environment variable is not set")?;
        if db_path_raw.trim().is_empty() {
            anyhow::bail!("DB_PATH must not be empty");
        }

        Ok(Self { port, db_path: PathBuf::from(db_path_raw) })
    }
}
