//! Content loading errors.

use std::path::PathBuf;

use skirmish_core::DefinitionError;
use thiserror::Error;

/// Errors from reading or validating content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A document was not valid JSON for its record type.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A character broke a definition limit.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    /// Two characters share an id.
    #[error("character '{0}' is defined twice")]
    DuplicateCharacter(String),
    /// A lookup named a character the roster does not have.
    #[error("unknown character '{0}'")]
    UnknownCharacter(String),
}
