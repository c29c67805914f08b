//! Unity AssetBundle platform patching
//!
//! This crate converts Unity AssetBundles between build target platforms
//! by rewriting the short platform signature stored near the start of the
//! file. The bundle is treated as an opaque byte stream; nothing of the
//! container format is parsed.
//!
//! - [`signature`] - byte search and single-occurrence replacement
//! - [`patcher`] - platform-to-platform signature rewrite
//! - [`identifier`] - `CAB-` bundle identifier extraction
//! - [`convert`] - single-file and directory-wide conversion
//!
//! # Example
//!
//! ```rust
//! use unity_platform_binary::BundlePatcher;
//! use unity_platform_core::{PlatformSignature, SignatureRegistry};
//!
//! let registry = SignatureRegistry::new(vec![
//!     PlatformSignature::new("Win", vec![0x05, 0x00, 0x00, 0x00]),
//!     PlatformSignature::new("Android", vec![0x0D, 0x00, 0x00, 0x00]),
//! ])?;
//!
//! let patched = BundlePatcher::new(&registry).patch(
//!     b"\x00\x01\x05\x00\x00\x00\xFF",
//!     "Win",
//!     "Android",
//! )?;
//! assert_eq!(patched.bytes, b"\x00\x01\x0D\x00\x00\x00\xFF");
//! # Ok::<(), unity_platform_core::PlatformError>(())
//! ```

pub mod bundle_file;
pub mod convert;
pub mod identifier;
pub mod io;
pub mod output;
pub mod patcher;
pub mod signature;

pub use bundle_file::BundleFile;
pub use convert::{
    BatchOptions, BatchSummary, ConversionOutcome, ConversionResult, Converter, Inspection,
};
pub use identifier::{extract_identifier, is_valid_identifier};
pub use io::{BundleIo, FsIo};
pub use output::{OutputPolicy, derive_modified_path};
pub use patcher::{BundlePatcher, PatchedBundle};
pub use signature::Replacement;

// Errors are shared with the core crate
pub use unity_platform_core::{PlatformError, Result};
