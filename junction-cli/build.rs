//! Build script for junction-cli.
//!
//! Generates the man page at build time using clap_mangen. The generated
//! page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing
//! from the main crate, since build scripts cannot depend on the crate
//! being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("junction")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage virtual namespace extension registrations")
        .long_about(
            "Command-line tool for installing, inspecting, and removing namespace extension mounts",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("registry")
                .long("registry")
                .help("Override the registry database location")
                .value_name("PATH")
                .global(true)
                .env("JUNCTION_REGISTRY"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the registration registry")
                .long_about("Create the registry database and its parent directory"),
            Command::new("install")
                .about("Install the mounts a descriptor declares")
                .long_about("Read a registration descriptor file and record its mount points"),
            Command::new("uninstall")
                .about("Remove every mount an identity holds")
                .long_about("Remove all mounts recorded for an extension identity at a scope"),
            Command::new("list")
                .about("List installed mounts")
                .long_about("Display installed extension mounts in various formats"),
            Command::new("show-registry-path")
                .about("Show the resolved registry database path")
                .long_about("Display the path of the registry database that commands would use"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("junction.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
