//! Error types for letterpress-engine
//!
//! This module defines all error types used throughout the build pipeline.
//! We use `thiserror` for structured error handling with good error messages.

use crate::hooks::HookError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the build pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading a template file
    #[error("Failed to read template {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an output file
    #[error("Failed to write output file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a directory
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Templates directory does not exist or cannot be walked
    #[error("Failed to scan templates directory {path}: {message}")]
    TemplateScan { path: PathBuf, message: String },

    /// Front matter, template syntax, or rendering error
    #[error(transparent)]
    Template(#[from] letterpress_template::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] letterpress_config::Error),

    /// Lifecycle hook error
    #[error(transparent)]
    Hook(#[from] HookError),
}
