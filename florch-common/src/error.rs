//! Error types for florch

use thiserror::Error;

use crate::types::FlRole;

/// Error types for the florch common library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// An identity appears more than once within one role set.
    #[error("Duplicate {role} identity: {id}")]
    DuplicateIdentity {
        /// Role set containing the duplicate
        role: FlRole,
        /// Repeated identity
        id: String,
    },
}
