//! Directory-wide conversion
//!
//! Every regular file directly inside the directory is converted in
//! place. A failure on one file never stops the others; each file gets
//! exactly one [`ConversionResult`] in the summary.

use super::Converter;
use super::types::{BatchSummary, ConversionResult};
use crate::bundle_file::BundleFile;
use crate::io::BundleIo;
use crate::output::OutputPolicy;
use std::path::Path;
use tracing::{debug, info, instrument};
use unity_platform_core::{PlatformError, Result};

/// Options for batch conversion
///
/// The defaults process every file in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Process files sorted by path instead of enumeration order
    pub sort: bool,
    /// Only attempt files whose name ends with this extension; others are skipped
    pub extension: Option<String>,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted(mut self) -> Self {
        self.sort = true;
        self
    }

    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Whether `file` passes the extension filter
    pub fn accepts(&self, file: &BundleFile) -> bool {
        let Some(extension) = self.extension.as_deref() else {
            return true;
        };
        let extension = extension.trim_start_matches('.').as_bytes();
        let Some(name) = file.path().file_name() else {
            return false;
        };
        let name = name.as_encoded_bytes();
        name.len() > extension.len()
            && name.ends_with(extension)
            && name[name.len() - extension.len() - 1] == b'.'
    }
}

impl<'a, I: BundleIo> Converter<'a, I> {
    /// Convert every file in `dir` in place from `old_platform` to `new_platform`
    pub fn convert_batch<P: AsRef<Path>>(
        &self,
        dir: P,
        old_platform: &str,
        new_platform: &str,
    ) -> Result<BatchSummary> {
        self.convert_batch_with(dir, old_platform, new_platform, &BatchOptions::default())
    }

    /// Batch conversion with explicit [`BatchOptions`]
    ///
    /// Unknown platform names and an unreadable directory are returned as
    /// errors since no file can be attempted; everything else is recorded
    /// per file.
    #[instrument(skip(self, dir, options), fields(dir = %dir.as_ref().display()))]
    pub fn convert_batch_with<P: AsRef<Path>>(
        &self,
        dir: P,
        old_platform: &str,
        new_platform: &str,
        options: &BatchOptions,
    ) -> Result<BatchSummary> {
        let dir = dir.as_ref();
        self.registry.validate_pair(old_platform, new_platform)?;

        let mut files = self
            .io
            .list_files(dir)
            .map_err(|e| PlatformError::io_at(dir, e))?;
        if options.sort {
            files.sort();
        }
        debug!("Found {} files in {}", files.len(), dir.display());

        let mut summary = BatchSummary::new();
        for path in files {
            let file = BundleFile::new(path);
            if !options.accepts(&file) {
                summary.push(ConversionResult::skipped(
                    file.path(),
                    "Skipped: extension does not match filter.",
                ));
                continue;
            }
            summary.push(self.convert_file(
                &file,
                old_platform,
                new_platform,
                &OutputPolicy::OverwriteInPlace,
            ));
        }

        info!(
            processed = summary.processed(),
            skipped = summary.skipped(),
            succeeded = summary.succeeded,
            "Batch conversion of {} finished",
            dir.display()
        );
        Ok(summary)
    }
}
