//! Temporary source tree builder for CLI tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temporary directory holding JavaScript sources
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with the given content
    pub fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Add an `Ext.define` class with one documented and one undocumented
    /// method
    pub fn add_define_class(&self, relative_path: &str, class_name: &str) -> &Self {
        let content = format!(
            r#"/**
 * The {name} class.
 */
Ext.define('{name}', {{
    extend: 'Ext.panel.Panel',

    /**
     * Loads records.
     * @param {{Object}} options
     */
    load: function(options) {{
        this.fireEvent('load', this);
    }},

    reset: function() {{
        return this;
    }}
}});
"#,
            name = class_name
        );
        self.add_file(relative_path, &content)
    }

    /// Run the `extdoc` binary in this directory
    pub fn run_cli(&self, args: &[&str]) -> std::io::Result<Output> {
        let binary = PathBuf::from(env!("CARGO_BIN_EXE_extdoc"));
        Command::new(&binary)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("EXTDOC_CONFIG")
            .args(args)
            .output()
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            output.status.success(),
            "CLI command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return (stdout, stderr, exit code)
    pub fn run_cli_failure(&self, args: &[&str]) -> (String, String, Option<i32>) {
        let output = self.run_cli(args).expect("Failed to run CLI");
        assert!(
            !output.status.success(),
            "CLI command {:?} should have failed",
            args
        );
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code(),
        )
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
