//! Error types for Unity platform conversion

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for platform conversion operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Main error type for platform signature lookup and bundle patching
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Platform name is not present in the signature registry
    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    /// The expected source platform signature does not occur in the bundle
    #[error("Platform signature not found for '{platform}'")]
    SignatureNotFound { platform: String },

    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// IO errors tied to a specific path
    #[error("IO error on {path:?}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two registry entries share a platform name
    #[error("Duplicate platform name: {name}")]
    DuplicatePlatform { name: String },

    /// Two registry entries share the same signature bytes
    #[error("Platforms '{first}' and '{second}' share the same signature")]
    DuplicateSignature { first: String, second: String },

    /// A registry entry has no signature bytes
    #[error("Empty signature for platform '{name}'")]
    EmptySignature { name: String },

    /// A signature in a registry file is not valid hex
    #[error("Invalid signature hex for platform '{name}': {message}")]
    InvalidSignatureHex { name: String, message: String },

    /// Registry configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlatformError {
    /// Create an unknown platform error
    pub fn unknown_platform<S: Into<String>>(name: S) -> Self {
        Self::UnknownPlatform { name: name.into() }
    }

    /// Create a signature not found error
    pub fn signature_not_found<S: Into<String>>(platform: S) -> Self {
        Self::SignatureNotFound {
            platform: platform.into(),
        }
    }

    /// Wrap an IO error with the path it occurred on
    pub fn io_at<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::IoAt {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error only concerns a single file and a batch may continue past it
    pub fn is_recoverable(&self) -> bool {
        match self {
            PlatformError::SignatureNotFound { .. } => true,
            PlatformError::Io(_) | PlatformError::IoAt { .. } => true,
            PlatformError::UnknownPlatform { .. } => false,
            PlatformError::DuplicatePlatform { .. }
            | PlatformError::DuplicateSignature { .. }
            | PlatformError::EmptySignature { .. }
            | PlatformError::InvalidSignatureHex { .. }
            | PlatformError::Config(_) => false,
        }
    }

    /// Whether this error was caused by a file system operation
    pub fn is_io(&self) -> bool {
        matches!(self, PlatformError::Io(_) | PlatformError::IoAt { .. })
    }
}
