//! Show-registry-path command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, resolve_registry_path, GlobalOptions};
use clap::Args;

/// Show the resolved registry database path.
#[derive(Args)]
pub struct ShowRegistryPathCommand {}

impl ShowRegistryPathCommand {
    /// Execute the show-registry-path command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let path = resolve_registry_path(global, &config)?;
        println!("{}", path.display());
        Ok(())
    }
}
