//! Unified error types for interface dependency queries

use thiserror::Error;

/// Main error type for configuration set operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Lookup errors
    #[error("Interface '{0}' not found in configuration")]
    MissingInterface(String),

    // Construction errors
    #[error("Interface stored under key '{key}' is named '{name}'")]
    InvalidInput { key: String, name: String },

    #[error("Duplicate interface name: {0}")]
    DuplicateInterface(String),

    // Ordering errors
    #[error("Cyclic dependency detected involving interface '{0}'")]
    DependencyCycle(String),
}

/// Result type alias for configuration set operations
pub type Result<T> = std::result::Result<T, Error>;
