//! CLI command implementations.
//!
//! Each command is a clap `Args` struct with an `execute` method taking the
//! shared global options.

mod init;
mod install;
mod list;
mod show_registry_path;
mod uninstall;

pub use init::InitCommand;
pub use install::InstallCommand;
pub use list::ListCommand;
pub use show_registry_path::ShowRegistryPathCommand;
pub use uninstall::UninstallCommand;
