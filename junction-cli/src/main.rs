//! Main entry point for the junction CLI.
//!
//! Command-line interface for the junction namespace extension registry:
//! - `init`: Initialize the registration registry
//! - `install`: Install the mounts a descriptor declares
//! - `uninstall`: Remove every mount an identity holds
//! - `list`: List installed mounts
//! - `show-registry-path`: Show the resolved registry database path

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _logger = junction::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        registry: cli.registry,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Install(cmd) => cmd.execute(&global),
        cli::Command::Uninstall(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::ShowRegistryPath(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
