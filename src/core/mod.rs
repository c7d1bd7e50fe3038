use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error types for the controlbar engine.
///
/// Covers the failures that can escape the engine: configuration loading
/// and bootstrap wiring. Runtime failures inside controls never surface
/// here; they are reported as [`Diagnostic`](crate::diagnostics::Diagnostic)
/// events instead.
#[derive(Error, Debug)]
pub enum ControlBarError {
    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Configuration field missing or invalid
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfigField {
        /// The field that is invalid
        field: String,
        /// Reason why the field is invalid
        reason: String,
    },

    /// A control the engine depends on was not produced by the registry
    #[error("control '{0}' is not registered")]
    MissingControl(String),
}

/// A specialized `Result` type for controlbar operations.
pub type Result<T> = std::result::Result<T, ControlBarError>;

impl ControlBarError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        ControlBarError::TomlParse {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with file path context.
    pub fn io(error: impl std::fmt::Display, path: &Path) -> Self {
        ControlBarError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
