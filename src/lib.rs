//! Unity AssetBundle Platform Converter
//!
//! Converts Unity AssetBundles (`.unity3d`) between build target platforms
//! by rewriting the platform signature stored in the file, and extracts
//! the embedded `CAB-` bundle identifier.
//!
//! The container format is never parsed: a bundle is an opaque byte
//! stream, its platform is found by signature search, and conversion is a
//! single bounded substitution of the first occurrence.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unity_platform::{Converter, OutputPolicy, SignatureRegistry};
//!
//! let registry = SignatureRegistry::builtin();
//! let converter = Converter::new(&registry);
//!
//! let info = converter.inspect("level1.unity3d")?;
//! println!("Platform: {:?}, bundle: {:?}", info.detected_platform, info.bundle_identifier);
//!
//! let result = converter.convert_one(
//!     "level1.unity3d",
//!     "StandaloneWindows 5",
//!     "Android",
//!     &OutputPolicy::DeriveNewPath,
//! )?;
//! println!("{}", result.message);
//!
//! # Ok::<(), unity_platform::PlatformError>(())
//! ```

// Re-export from core and binary crates
pub use unity_platform_core::{
    PlatformEntry, PlatformError, PlatformSignature, RegistryConfig, Result, SignatureRegistry,
    constants::*,
};

pub use unity_platform_binary::{
    BatchOptions, BatchSummary, BundleFile, BundleIo, BundlePatcher, ConversionOutcome,
    ConversionResult, Converter, FsIo, Inspection, OutputPolicy, PatchedBundle,
    derive_modified_path, extract_identifier, is_valid_identifier,
};

/// Load the registry from `path` if given, the built-in table otherwise
pub fn load_registry<P: AsRef<std::path::Path>>(path: Option<P>) -> Result<SignatureRegistry> {
    match path {
        Some(path) => SignatureRegistry::from_yaml_file(path),
        None => Ok(SignatureRegistry::builtin()),
    }
}
