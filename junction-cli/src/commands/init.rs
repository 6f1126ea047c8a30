//! Init command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, shorten_path, GlobalOptions};
use clap::Args;

/// Initialize the registration registry.
#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Opening the store creates the database file, its parent directory,
    /// and the schema, so initialization is just an open plus a report.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        if !global.quiet {
            match store.path() {
                Some(path) => println!("Initialized registry at {}", shorten_path(path)),
                None => println!("Initialized in-memory registry"),
            }
        }
        Ok(())
    }
}
