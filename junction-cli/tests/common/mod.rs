//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Descriptor fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated registry database.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the registry database
    pub registry: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The registry path points into the temporary directory; the file is
    /// created on first use by the CLI.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let registry = temp_path.join("registry.db");

        Self {
            temp_dir,
            temp_path,
            registry,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("junction").expect("Failed to find junction binary")
    }

    /// Get a command builder with the registry pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--registry").arg(&self.registry);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a descriptor YAML file and return its path.
    pub fn write_descriptor(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write descriptor");
        path
    }

    /// Write a minimal descriptor for `identity` mounted at (computer, label).
    pub fn simple_descriptor(&self, identity: &str, label: &str) -> PathBuf {
        let contents = format!(
            "identity: {identity}\n\
             tooltip: test extension\n\
             mounts:\n\
             \x20 - region: computer\n\
             \x20   label: {label}\n"
        );
        self.write_descriptor(&format!("{identity}.yaml"), &contents)
    }

    /// Install a descriptor file, asserting success.
    pub fn install(&self, descriptor: &Path) {
        self.command()
            .arg("install")
            .arg(descriptor)
            .assert()
            .success();
    }

    /// List all mounts and return stdout.
    pub fn list(&self) -> String {
        let output = self
            .command()
            .arg("list")
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
