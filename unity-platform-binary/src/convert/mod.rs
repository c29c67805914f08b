//! Bundle conversion
//!
//! [`Converter`] is the interface front-ends call: it lists platforms,
//! inspects bundles and converts single files or whole directories.
//! Per-file problems (missing signature, unreadable or unwritable files)
//! are reported in a [`ConversionResult`]; only unknown platform names are
//! returned as errors, before any file is touched.
//!
//! # Examples
//!
//! ```rust,no_run
//! use unity_platform_binary::{Converter, OutputPolicy};
//! use unity_platform_core::SignatureRegistry;
//!
//! let registry = SignatureRegistry::builtin();
//! let converter = Converter::new(&registry);
//!
//! let result = converter.convert_one(
//!     "level1.unity3d",
//!     "StandaloneWindows 5",
//!     "Android",
//!     &OutputPolicy::DeriveNewPath,
//! )?;
//! println!("{}", result.message);
//!
//! let summary = converter.convert_batch("bundles", "StandaloneWindows 5", "Android")?;
//! println!("{}", summary);
//! # Ok::<(), unity_platform_core::PlatformError>(())
//! ```

pub mod batch;
pub mod types;

pub use batch::BatchOptions;
pub use types::{BatchSummary, ConversionOutcome, ConversionResult};

use crate::bundle_file::BundleFile;
use crate::identifier::extract_identifier;
use crate::io::{BundleIo, FsIo};
use crate::output::OutputPolicy;
use crate::patcher::BundlePatcher;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use unity_platform_core::{PlatformError, Result, SignatureRegistry};

/// What a bundle currently declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub path: PathBuf,
    /// First registered platform whose signature occurs in the file
    pub detected_platform: Option<String>,
    /// Every registered platform whose signature occurs in the file
    pub matching_platforms: Vec<String>,
    pub bundle_identifier: Option<String>,
    pub size: usize,
}

/// Converts bundles between platforms using a [`SignatureRegistry`]
#[derive(Debug, Clone)]
pub struct Converter<'a, I: BundleIo = FsIo> {
    registry: &'a SignatureRegistry,
    io: I,
}

impl<'a> Converter<'a, FsIo> {
    /// Converter working on the real file system
    pub fn new(registry: &'a SignatureRegistry) -> Self {
        Self::with_io(registry, FsIo)
    }
}

impl<'a, I: BundleIo> Converter<'a, I> {
    /// Converter using custom file access
    pub fn with_io(registry: &'a SignatureRegistry, io: I) -> Self {
        Self { registry, io }
    }

    pub fn registry(&self) -> &'a SignatureRegistry {
        self.registry
    }

    pub fn patcher(&self) -> BundlePatcher<'a> {
        BundlePatcher::new(self.registry)
    }

    /// Registered platform names, in registry order
    pub fn list_platforms(&self) -> Vec<&'a str> {
        self.registry.platform_names()
    }

    /// Detect the platform and bundle identifier of a file without modifying it
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn inspect<P: AsRef<Path>>(&self, path: P) -> Result<Inspection> {
        let file = BundleFile::new(path.as_ref());
        let data = file.read(&self.io)?;
        Ok(self.inspect_bytes(file.path(), &data))
    }

    /// Inspect bundle bytes already in memory
    pub fn inspect_bytes(&self, path: &Path, data: &[u8]) -> Inspection {
        Inspection {
            path: path.to_path_buf(),
            detected_platform: self.registry.detect_platform(data).map(str::to_string),
            matching_platforms: self
                .registry
                .matching_platforms(data)
                .into_iter()
                .map(str::to_string)
                .collect(),
            bundle_identifier: extract_identifier(data),
            size: data.len(),
        }
    }

    /// Convert a single file from `old_platform` to `new_platform`
    ///
    /// Returns `Err` only if a platform name is not registered. Every other
    /// outcome, including I/O failures, is described by the result.
    #[instrument(skip(self, path, policy), fields(path = %path.as_ref().display()))]
    pub fn convert_one<P: AsRef<Path>>(
        &self,
        path: P,
        old_platform: &str,
        new_platform: &str,
        policy: &OutputPolicy,
    ) -> Result<ConversionResult> {
        self.registry.validate_pair(old_platform, new_platform)?;
        let file = BundleFile::new(path.as_ref());
        Ok(self.convert_file(&file, old_platform, new_platform, policy))
    }

    /// Convert a single file to `new_platform`, detecting its current platform
    #[instrument(skip(self, path, policy), fields(path = %path.as_ref().display()))]
    pub fn convert_detected<P: AsRef<Path>>(
        &self,
        path: P,
        new_platform: &str,
        policy: &OutputPolicy,
    ) -> Result<ConversionResult> {
        self.registry.signature_for(new_platform)?;
        let file = BundleFile::new(path.as_ref());

        let data = match file.read(&self.io) {
            Ok(data) => data,
            Err(e) => return Ok(self.io_failure(&file, "read", e)),
        };

        let Some(old_platform) = self.registry.detect_platform(&data) else {
            return Ok(ConversionResult::signature_not_found(
                file.path(),
                "No known platform signature found in file.",
            ));
        };

        if old_platform == new_platform {
            return Ok(ConversionResult::skipped(
                file.path(),
                format!("File already declares platform '{}'.", new_platform),
            ));
        }

        info!("Detected platform '{}' in {}", old_platform, file.display_name());
        Ok(self.convert_bytes(&file, &data, old_platform, new_platform, policy))
    }

    /// Read, patch and write one file, capturing every per-file failure
    pub(crate) fn convert_file(
        &self,
        file: &BundleFile,
        old_platform: &str,
        new_platform: &str,
        policy: &OutputPolicy,
    ) -> ConversionResult {
        match file.read(&self.io) {
            Ok(data) => self.convert_bytes(file, &data, old_platform, new_platform, policy),
            Err(e) => self.io_failure(file, "read", e),
        }
    }

    fn convert_bytes(
        &self,
        file: &BundleFile,
        data: &[u8],
        old_platform: &str,
        new_platform: &str,
        policy: &OutputPolicy,
    ) -> ConversionResult {
        let patched = match self.patcher().patch(data, old_platform, new_platform) {
            Ok(patched) => patched,
            Err(PlatformError::SignatureNotFound { .. }) => {
                let message = self.not_found_message(data, old_platform, new_platform);
                warn!("{}: {}", file.display_name(), message);
                return ConversionResult::signature_not_found(file.path(), message);
            }
            Err(e) if !e.is_recoverable() => {
                return ConversionResult::skipped(file.path(), format!("Skipped: {}", e));
            }
            Err(e) => return self.io_failure(file, "patch", e),
        };

        let destination = policy.output_path(file.path());
        if let Err(e) = file.write_to(&self.io, &destination, &patched.bytes) {
            return self.io_failure(file, "write", e);
        }

        info!(
            offset = patched.offset(),
            size_delta = patched.replacement.size_delta(),
            "Converted {} from '{}' to '{}' -> {}",
            file.display_name(),
            old_platform,
            new_platform,
            destination.display()
        );
        ConversionResult::success(file.path(), destination)
    }

    fn not_found_message(&self, data: &[u8], old_platform: &str, new_platform: &str) -> String {
        if self.registry.detect_platform(data) == Some(new_platform) {
            format!(
                "Platform signature for '{}' not found; file already declares '{}'.",
                old_platform, new_platform
            )
        } else {
            format!(
                "Platform signature not found. Ensure the correct platform is selected (expected '{}').",
                old_platform
            )
        }
    }

    fn io_failure(&self, file: &BundleFile, action: &str, error: PlatformError) -> ConversionResult {
        warn!("Failed to {} {}: {}", action, file.display_name(), error);
        ConversionResult::io_failure(
            file.path(),
            format!("Failed to {} file: {}", action, error),
        )
    }
}
