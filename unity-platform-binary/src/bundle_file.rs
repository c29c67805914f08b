//! AssetBundle file handle

use crate::io::BundleIo;
use std::fmt;
use std::path::{Path, PathBuf};
use unity_platform_core::{PlatformError, Result};

/// A bundle on disk
///
/// Contents are loaded on demand and not kept between operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BundleFile {
    path: PathBuf,
}

impl BundleFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in messages, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Read the whole bundle
    pub fn read<I: BundleIo>(&self, io: &I) -> Result<Vec<u8>> {
        io.read(&self.path)
            .map_err(|e| PlatformError::io_at(&self.path, e))
    }

    /// Write `data` in full to `destination`
    pub fn write_to<I: BundleIo>(&self, io: &I, destination: &Path, data: &[u8]) -> Result<()> {
        io.write(destination, data)
            .map_err(|e| PlatformError::io_at(destination, e))
    }
}

impl fmt::Display for BundleFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<PathBuf> for BundleFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for BundleFile {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}
