//! Uninstall command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;

use junction::{ExtensionIdentity, RegistrationScope};

/// Remove every mount an identity holds.
#[derive(Args)]
pub struct UninstallCommand {
    /// Identity of the extension to remove
    #[arg(value_name = "IDENTITY")]
    pub identity: String,

    /// Registration scope
    #[arg(long, value_name = "SCOPE", env = "JUNCTION_DEFAULT_SCOPE")]
    pub scope: Option<String>,
}

impl UninstallCommand {
    /// Execute the uninstall command.
    ///
    /// Removing an identity that holds no mounts is not an error; the
    /// command reports zero removals and exits successfully.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let scope = match &self.scope {
            Some(text) => text
                .parse::<RegistrationScope>()
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            None => config.effective_scope(),
        };

        let identity = ExtensionIdentity::new(self.identity)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let mut store = open_store(global, &config)?;
        let removed = store.uninstall(&identity, scope)?;

        if !global.quiet {
            println!("Removed {removed} mount(s) for '{identity}' at scope {scope}");
        }
        Ok(())
    }
}
