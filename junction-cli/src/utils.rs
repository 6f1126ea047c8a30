//! Utility functions for CLI operations.
//!
//! Common helpers used across CLI commands: configuration loading,
//! registry path resolution, store opening, and output formatting.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use std::time::Duration;

use junction::{Config, RegistrationStore};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the registry database location.
    pub registry: Option<PathBuf>,
}

/// Load configuration from the user file and environment.
pub fn load_configuration(_global: &GlobalOptions) -> Result<Config, CliError> {
    Config::load().map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the registry database path.
///
/// Priority: `--registry` flag > configuration > `~/.junction/registry.db`.
pub fn resolve_registry_path(
    global: &GlobalOptions,
    config: &Config,
) -> Result<PathBuf, CliError> {
    if let Some(path) = &global.registry {
        return Ok(path.clone());
    }
    config
        .registry_path()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the registration store the global options point at.
///
/// The configured maximum lock wait bounds how long commands block on a
/// registry held by another process.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<RegistrationStore, CliError> {
    let path = resolve_registry_path(global, config)?;
    let lock_wait = Duration::from_secs(config.effective_lock_wait_seconds());
    RegistrationStore::open_with_lock_wait(path, lock_wait).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
