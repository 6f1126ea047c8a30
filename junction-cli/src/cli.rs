//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    InitCommand, InstallCommand, ListCommand, ShowRegistryPathCommand, UninstallCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing namespace extension registrations.
#[derive(Parser)]
#[command(name = "junction")]
#[command(version, about = "Manage virtual namespace extension registrations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the registry database location
    #[arg(long, value_name = "PATH", global = true, env = "JUNCTION_REGISTRY")]
    pub registry: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the registration registry
    Init(InitCommand),

    /// Install the mounts a descriptor declares
    Install(InstallCommand),

    /// Remove every mount an identity holds
    Uninstall(UninstallCommand),

    /// List installed mounts
    List(ListCommand),

    /// Show the resolved registry database path
    ShowRegistryPath(ShowRegistryPathCommand),
}
