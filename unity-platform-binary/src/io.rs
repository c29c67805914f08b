//! File access used by the converter
//!
//! Conversion reads and writes whole files. The [`BundleIo`] trait is the
//! seam between the converter and the file system; [`FsIo`] is the real
//! implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Whole-file access for bundle conversion
pub trait BundleIo {
    /// Regular files directly inside `dir`, in enumeration order
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read the full contents of `path`
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the contents of `path` with `data`, creating parent directories
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// [`BundleIo`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsIo;

impl BundleIo for FsIo {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path()));
        Ok(regular_files(entries))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)
    }
}

/// Keep the entries that are regular files
///
/// An entry that cannot be read is logged and skipped so one bad entry
/// does not hide the rest of the directory.
fn regular_files<I>(entries: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        // Follows symlinks, so links to regular files are included
        if fs::metadata(&path).is_ok_and(|m| m.is_file()) {
            files.push(path);
        }
    }
    files
}

impl<T: BundleIo + ?Sized> BundleIo for &T {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_files(dir)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        (**self).write(path, data)
    }
}
