//! Error types and exit codes for extdoc-engine

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for extdoc-engine operations
#[derive(Error, Debug)]
pub enum ExtdocError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// The grammar could not build a usable tree for the file.
    ///
    /// Reported once per file; `token` is the offending source text or
    /// `"end of file"` when the input ended early.
    #[error("{message} at line {line}: unexpected {token}")]
    Syntax {
        message: String,
        line: usize,
        token: String,
    },

    #[error("Failed to parse file: {message}")]
    ParseFailure { message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtdocError {
    /// Build the structured syntax error raised for a whole file
    pub fn syntax(line: usize, token: impl Into<String>) -> Self {
        Self::Syntax {
            message: "invalid syntax".to_string(),
            line,
            token: token.into(),
        }
    }

    /// Line of the failure, when the error is tied to a source position
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Convert error to an exit code:
    /// - 1: File not found / IO error
    /// - 2: Invalid configuration
    /// - 3: Syntax or parse failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
            Self::Config { .. } => ExitCode::from(2),
            Self::Syntax { .. } => ExitCode::from(3),
            Self::ParseFailure { .. } => ExitCode::from(3),
        }
    }
}

/// Result type alias for extdoc-engine operations
pub type Result<T> = std::result::Result<T, ExtdocError>;
