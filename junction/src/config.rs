//! Configuration loading for tools built on the engine.
//!
//! Settings come from an optional YAML file at `~/.junction/config.yaml`
//! and can be overridden by `JUNCTION_*` environment variables, which take
//! precedence over the file.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registration::RegistrationScope;

/// Default busy wait, in seconds, applied when nothing overrides it.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Tool configuration.
///
/// All fields are optional; [`Config::registry_path`] and friends resolve
/// the effective value.
///
/// # Examples
///
/// ```
/// use junction::Config;
///
/// let config: Config = serde_yaml::from_str("default_scope: machine").unwrap();
/// assert!(config.registry.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the registration registry database.
    pub registry: Option<PathBuf>,

    /// Scope used when a command does not specify one.
    pub default_scope: Option<RegistrationScope>,

    /// Maximum time to wait for the registry lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

impl Config {
    /// Loads configuration from the default file, then applies environment
    /// overrides.
    ///
    /// A missing file is not an error; it yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed, or an
    /// environment override has an invalid value.
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Loads configuration from a specific YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// The default location of the user configuration file, if the home
    /// directory can be determined.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        home::home_dir().map(|dir| dir.join(".junction").join("config.yaml"))
    }

    /// Applies `JUNCTION_*` environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a variable holds an invalid value.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = env::var("JUNCTION_REGISTRY") {
            self.registry = Some(PathBuf::from(path));
        }

        if let Ok(scope) = env::var("JUNCTION_DEFAULT_SCOPE") {
            self.default_scope = Some(scope.parse()?);
        }

        if let Ok(seconds) = env::var("JUNCTION_MAX_LOCK_WAIT") {
            self.maximum_lock_wait_seconds =
                Some(seconds.parse().map_err(|_| Error::Validation {
                    field: "JUNCTION_MAX_LOCK_WAIT".to_string(),
                    message: "must be a non-negative integer".to_string(),
                })?);
        }

        Ok(())
    }

    /// The effective registry path: the configured one, or
    /// `~/.junction/registry.db`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when no path is configured and the
    /// home directory cannot be determined.
    pub fn registry_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.registry {
            return Ok(path.clone());
        }
        home::home_dir()
            .map(|dir| dir.join(".junction").join("registry.db"))
            .ok_or_else(|| Error::Validation {
                field: "registry".to_string(),
                message: "cannot determine home directory; set JUNCTION_REGISTRY".to_string(),
            })
    }

    /// The effective default scope.
    #[must_use]
    pub fn effective_scope(&self) -> RegistrationScope {
        self.default_scope.unwrap_or_default()
    }

    /// The effective lock wait.
    #[must_use]
    pub fn effective_lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }
}
