//! Error types for command tree operations.
//!
//! Resolution and completion are total and never fail. Errors come from value
//! validation on a misconfigured node and from loading tree definitions.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur while validating values or loading trees.
#[derive(Debug, Error)]
pub enum TreeError {
    /// [`is_valid`](crate::Command::is_valid) was called on a node without a
    /// plain completer.
    #[error("completer must be specified for cmd {0:?}")]
    MissingCompleter(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Definition file extension is neither YAML nor JSON.
    #[error("unsupported definition format: {0}")]
    UnsupportedFormat(String),

    /// The loaded tree failed structural validation.
    #[error("invalid command tree: {}", join_errors(.0))]
    InvalidTree(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;
