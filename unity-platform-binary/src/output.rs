//! Output location policies for converted bundles

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use unity_platform_core::{BUNDLE_EXTENSION, MODIFIED_SUFFIX};

/// Where a converted bundle is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputPolicy {
    /// Write next to the source as `<stem>_modified.unity3d`, keeping the original.
    ///
    /// Only names ending exactly in `.unity3d` receive the suffix. Any other
    /// name (including `.UNITY3D` or `.bundle`) maps to itself, so the
    /// source file is overwritten.
    #[default]
    DeriveNewPath,
    /// Overwrite the source file
    OverwriteInPlace,
    /// Write into another directory under the same file name
    CopyInto(PathBuf),
}

impl OutputPolicy {
    /// Destination path for a bundle read from `source`
    pub fn output_path(&self, source: &Path) -> PathBuf {
        match self {
            OutputPolicy::DeriveNewPath => derive_modified_path(source),
            OutputPolicy::OverwriteInPlace => source.to_path_buf(),
            OutputPolicy::CopyInto(dir) => match source.file_name() {
                Some(name) => dir.join(name),
                None => dir.clone(),
            },
        }
    }

    /// Whether writing under this policy replaces the source file
    pub fn overwrites_source(&self, source: &Path) -> bool {
        self.output_path(source) == source
    }
}

/// `<stem>_modified.unity3d` for `.unity3d` files, the unchanged path otherwise
///
/// The suffix is matched on the raw file name, so names that are not valid
/// UTF-8 are still given a separate output path.
pub fn derive_modified_path(source: &Path) -> PathBuf {
    let Some(file_name) = source.file_name() else {
        return source.to_path_buf();
    };
    if !file_name
        .as_encoded_bytes()
        .ends_with(BUNDLE_EXTENSION.as_bytes())
    {
        return source.to_path_buf();
    }

    // A bare `.unity3d` has no extension and keeps an empty stem
    let stem = match source.extension() {
        Some(_) => source.file_stem().unwrap_or_default(),
        None => OsStr::new(""),
    };
    let mut modified = OsString::from(stem);
    modified.push(MODIFIED_SUFFIX);
    modified.push(BUNDLE_EXTENSION);
    source.with_file_name(modified)
}
