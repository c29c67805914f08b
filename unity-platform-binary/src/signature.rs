//! Byte signature search and single-occurrence replacement
//!
//! Bundles are treated as opaque byte streams: a signature is located by
//! plain substring search and replaced exactly once.

use memchr::memmem;

/// Location and size of a performed replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    /// Offset of the replaced occurrence in the original data
    pub offset: usize,
    /// Number of bytes removed at `offset`
    pub removed: usize,
    /// Number of bytes inserted at `offset`
    pub inserted: usize,
}

impl Replacement {
    /// Change in total length caused by the replacement
    pub fn size_delta(&self) -> isize {
        self.inserted as isize - self.removed as isize
    }
}

/// Offset of the first occurrence of `needle` in `haystack`
pub fn find_first(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    memmem::find(haystack, needle)
}

/// Number of non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }
    memmem::find_iter(haystack, needle).count()
}

/// Replace the first occurrence of `old` with `new`
///
/// Returns the new buffer and where the replacement happened, or `None`
/// when `old` does not occur. Bytes after the occurrence shift when the
/// two sequences differ in length; later occurrences of `old` are kept.
pub fn replace_first(data: &[u8], old: &[u8], new: &[u8]) -> Option<(Vec<u8>, Replacement)> {
    let offset = find_first(data, old)?;
    let end = offset + old.len();

    let mut out = Vec::with_capacity(data.len() - old.len() + new.len());
    out.extend_from_slice(&data[..offset]);
    out.extend_from_slice(new);
    out.extend_from_slice(&data[end..]);

    Some((
        out,
        Replacement {
            offset,
            removed: old.len(),
            inserted: new.len(),
        },
    ))
}
