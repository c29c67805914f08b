//! Unity Platform Core
//!
//! Core types for converting Unity AssetBundles between build target
//! platforms: the platform signature registry, its configuration file
//! format, shared constants and the error taxonomy used by the
//! patching and batch conversion crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod registry;

// Re-export main types
pub use config::{PlatformEntry, RegistryConfig};
pub use constants::*;
pub use error::{PlatformError, Result};
pub use registry::{PlatformSignature, SignatureRegistry};
