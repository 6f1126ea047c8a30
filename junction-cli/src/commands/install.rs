//! Install command implementation.
//!
//! Reads a registration descriptor from a YAML file and records its mount
//! points in the registry at the requested scope.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

use junction::{Error as LibError, RegistrationDescriptor, RegistrationScope};

/// Install the mounts a descriptor declares.
#[derive(Args)]
pub struct InstallCommand {
    /// Path to the registration descriptor (YAML)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: PathBuf,

    /// Registration scope
    #[arg(long, value_name = "SCOPE", env = "JUNCTION_DEFAULT_SCOPE")]
    pub scope: Option<String>,
}

impl InstallCommand {
    /// Execute the install command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let scope = match &self.scope {
            Some(text) => text
                .parse::<RegistrationScope>()
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            None => config.effective_scope(),
        };

        let contents = std::fs::read_to_string(&self.descriptor)?;
        let descriptor: RegistrationDescriptor = serde_yaml::from_str(&contents)
            .map_err(|e| CliError::InvalidArguments(format!("malformed descriptor: {e}")))?;

        let mut store = open_store(global, &config)?;
        match store.install(&descriptor, scope) {
            Ok(()) => {
                if !global.quiet {
                    println!(
                        "Installed {} mount(s) for '{}' at scope {scope}",
                        descriptor.mounts.len(),
                        descriptor.identity
                    );
                }
                Ok(())
            }
            Err(e @ LibError::RegistrationConflict { .. }) => {
                Err(CliError::SemanticFailure(e.to_string()))
            }
            Err(e) => Err(CliError::from(e)),
        }
    }
}
