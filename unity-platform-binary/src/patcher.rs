//! Bundle platform patching
//!
//! Swaps the platform signature of a bundle for another registered one.
//! The patcher only transforms bytes; where the result is written is
//! decided by the caller through [`crate::output::OutputPolicy`].

use crate::signature::{self, Replacement};
use tracing::debug;
use unity_platform_core::{PlatformError, Result, SignatureRegistry};

/// Bytes of a patched bundle together with the replacement performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedBundle {
    pub bytes: Vec<u8>,
    pub replacement: Replacement,
}

impl PatchedBundle {
    /// Offset of the rewritten signature
    pub fn offset(&self) -> usize {
        self.replacement.offset
    }
}

/// Rewrites platform signatures using a [`SignatureRegistry`]
#[derive(Debug, Clone, Copy)]
pub struct BundlePatcher<'a> {
    registry: &'a SignatureRegistry,
}

impl<'a> BundlePatcher<'a> {
    pub fn new(registry: &'a SignatureRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a SignatureRegistry {
        self.registry
    }

    /// Replace the first occurrence of `old_platform`'s signature with
    /// `new_platform`'s signature.
    ///
    /// Fails with [`PlatformError::UnknownPlatform`] if either name is not
    /// registered, and with [`PlatformError::SignatureNotFound`] if the
    /// old signature does not occur in `data`.
    pub fn patch(&self, data: &[u8], old_platform: &str, new_platform: &str) -> Result<PatchedBundle> {
        let old = self.registry.signature_for(old_platform)?;
        let new = self.registry.signature_for(new_platform)?;

        let (bytes, replacement) = signature::replace_first(data, &old.bytes, &new.bytes)
            .ok_or_else(|| PlatformError::signature_not_found(old_platform))?;

        debug!(
            offset = replacement.offset,
            size_delta = replacement.size_delta(),
            "Replaced {} signature with {}",
            old.name,
            new.name
        );

        let occurrences = signature::count_occurrences(data, &old.bytes);
        if occurrences > 1 {
            debug!(
                "{} later occurrence(s) of the {} signature left unchanged",
                occurrences - 1,
                old.name
            );
        }

        Ok(PatchedBundle { bytes, replacement })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unity_platform_core::PlatformSignature;

    fn win_android() -> SignatureRegistry {
        SignatureRegistry::new(vec![
            PlatformSignature::new("Win", [0x05, 0x00, 0x00, 0x00]),
            PlatformSignature::new("Android", [0x0D, 0x00, 0x00, 0x00]),
        ])
        .unwrap()
    }

    #[test]
    fn test_win_to_android() {
        let registry = win_android();
        let patcher = BundlePatcher::new(&registry);
        let blob = b"\x00\x01\x05\x00\x00\x00\xFF";

        let patched = patcher.patch(blob, "Win", "Android").unwrap();
        assert_eq!(patched.bytes, b"\x00\x01\x0D\x00\x00\x00\xFF");
        assert_eq!(patched.offset(), 2);
    }

    #[test]
    fn test_signature_not_found() {
        let registry = win_android();
        let patcher = BundlePatcher::new(&registry);
        let blob = b"\x00\x01\x0D\x00\x00\x00\xFF";

        let err = patcher.patch(blob, "Win", "Android").unwrap_err();
        assert!(matches!(err, PlatformError::SignatureNotFound { ref platform } if platform == "Win"));
    }

    #[test]
    fn test_unknown_platform_checked_before_search() {
        let registry = win_android();
        let patcher = BundlePatcher::new(&registry);

        let err = patcher.patch(b"", "Win", "WebGL").unwrap_err();
        assert!(matches!(err, PlatformError::UnknownPlatform { ref name } if name == "WebGL"));
    }

    #[test]
    fn test_only_first_occurrence_patched() {
        let registry = win_android();
        let patcher = BundlePatcher::new(&registry);
        let blob = [0x05, 0, 0, 0, 0xAA, 0x05, 0, 0, 0];

        let patched = patcher.patch(&blob, "Win", "Android").unwrap();
        assert_eq!(patched.bytes, vec![0x0D, 0, 0, 0, 0xAA, 0x05, 0, 0, 0]);
    }

    #[test]
    fn test_round_trip() {
        let registry = win_android();
        let patcher = BundlePatcher::new(&registry);
        let blob = b"UnityFS\x00\x00\x00\x00\x06\x05\x00\x00\x00payload".to_vec();

        let there = patcher.patch(&blob, "Win", "Android").unwrap();
        let back = patcher.patch(&there.bytes, "Android", "Win").unwrap();
        assert_eq!(back.bytes, blob);
    }
}
