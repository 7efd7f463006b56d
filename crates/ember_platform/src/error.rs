//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A call through the platform bridge failed
    #[error("Bridge call failed: {0}")]
    Bridge(String),

    /// A platform property the adapter relies on was absent
    #[error("Missing platform property: {0}")]
    MissingProperty(&'static str),

    /// A platform property carried a value that could not be parsed
    #[error("Malformed platform property {name}: {value:?}")]
    MalformedProperty {
        name: &'static str,
        value: String,
    },

    /// Operation not supported on this platform
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
