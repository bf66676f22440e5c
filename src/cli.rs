//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::EngineConfig;
use crate::detectors::ScopeMode;
use crate::error::Result;

/// Extract documentation entities from JavaScript sources
#[derive(Parser, Debug)]
#[command(name = "extdoc")]
#[command(about = "Extracts classes, methods, properties and events from documented JavaScript")]
#[command(version)]
pub struct Cli {
    /// Source files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Root identifier accepted for framework idioms (repeatable);
    /// replaces the configured list
    #[arg(short, long = "namespace", value_name = "ROOT")]
    pub namespaces: Vec<String>,

    /// Configuration file
    #[arg(short, long, env = "EXTDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// How `this` aliases declared in nested blocks propagate
    #[arg(long, value_enum)]
    pub scope_mode: Option<ScopeMode>,

    /// Output format
    #[arg(short, long, default_value = "json", value_enum)]
    pub format: OutputFormat,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per file
    #[default]
    Json,
    /// Indented human-readable listing
    Text,
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if !self.namespaces.is_empty() {
            config.namespaces = self.namespaces.clone();
        }
        if let Some(mode) = self.scope_mode {
            config.scope_mode = mode;
        }
        Ok(config)
    }

    /// Log filter directive for the subscriber
    pub fn log_level<'a>(&self, config: &'a EngineConfig) -> &'a str {
        if self.verbose {
            "debug"
        } else {
            &config.logging.level
        }
    }
}
