//! Engine configuration.
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! namespaces = ["Ext", "MyApp"]
//! scope_mode = "lexical"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::detectors::ScopeMode;
use crate::error::{ExtdocError, Result};
use crate::namespace::DEFAULT_ROOT;

/// extdoc configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Root identifiers accepted for framework idioms
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,

    /// Propagation of `this` aliases out of nested blocks
    #[serde(default)]
    pub scope_mode: ScopeMode,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_namespaces() -> Vec<String> {
    vec![DEFAULT_ROOT.to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
            scope_mode: ScopeMode::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl EngineConfig {
    /// Parse configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ExtdocError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExtdocError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ExtdocError::Config {
                message: format!(
                    "Invalid log level: {}. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        Ok(())
    }
}
