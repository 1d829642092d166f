// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for clint.
//!
//! Configuration problems are load-time failures. A message that breaks a
//! rule is not an error at this level: it is reported through
//! [`crate::rules::ValidationResult`] and only becomes [`LintError::Failed`]
//! when the CLI decides the exit status.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for clint operations.
#[derive(Error, Debug)]
pub enum ClintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Lint outcome errors
    #[error("Lint error: {0}")]
    Lint(#[from] LintError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Unknown preset in extends: '{name}' (known presets: {known})")]
    UnknownPreset { name: String, known: String },

    #[error("Unknown rule: '{rule}'")]
    UnknownRule { rule: String },

    #[error("Invalid value for rule '{rule}': {message}")]
    InvalidValue { rule: String, message: String },

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnore { pattern: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("Invalid commit reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("Failed to read commit message file {path}: {message}")]
    EditFileUnreadable { path: PathBuf, message: String },
}

/// Errors describing the outcome of a lint run.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("{count} problem(s) found in {messages} commit message(s)")]
    Failed { count: usize, messages: usize },

    #[error("No commit message to lint")]
    NoInput,
}

/// Result type alias for clint operations.
pub type Result<T> = std::result::Result<T, ClintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ClintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
