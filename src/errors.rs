//! Error types for the notebook application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during note management operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the notebook application.
#[derive(Error, Debug)]
pub enum NotebookError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Add-note validation failure: both title and content empty after trim.
    #[error("{message}")]
    EmptyNote { message: String },

    /// Data directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}
