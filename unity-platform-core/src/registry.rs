//! Platform signature registry
//!
//! Maps human-readable platform names to the byte signature a bundle
//! carries for that build target, and detects which known platform a
//! bundle currently declares.
//!
//! Detection is a plain containment test. Signatures are short (four
//! bytes for every built-in platform) so unrelated data can match by
//! coincidence; callers get the first registered platform whose
//! signature occurs anywhere in the bundle.

use crate::constants::BUILTIN_PLATFORMS;
use crate::error::{PlatformError, Result};
use indexmap::IndexMap;
use memchr::memmem;
use std::fmt;

/// A platform name together with its byte signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSignature {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PlatformSignature {
    pub fn new<S: Into<String>>(name: S, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Signature length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset of the first occurrence of this signature in `data`
    pub fn find_in(&self, data: &[u8]) -> Option<usize> {
        memmem::find(data, &self.bytes)
    }

    /// Whether `data` contains this signature anywhere
    pub fn is_contained_in(&self, data: &[u8]) -> bool {
        self.find_in(data).is_some()
    }

    /// Signature bytes as lowercase hex, e.g. `0d000000`
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for PlatformSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.to_hex())
    }
}

/// Immutable, ordered table of platform signatures
///
/// Built once at startup and passed explicitly to every operation that
/// needs it. Names are unique keys and signatures are distinct byte
/// sequences; both are checked on construction.
#[derive(Debug, Clone)]
pub struct SignatureRegistry {
    platforms: IndexMap<String, PlatformSignature>,
}

impl SignatureRegistry {
    /// Build a registry from entries, keeping their order for detection
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = PlatformSignature>,
    {
        let mut platforms: IndexMap<String, PlatformSignature> = IndexMap::new();

        for entry in entries {
            if entry.is_empty() {
                return Err(PlatformError::EmptySignature { name: entry.name });
            }
            if platforms.contains_key(&entry.name) {
                return Err(PlatformError::DuplicatePlatform { name: entry.name });
            }
            if let Some(existing) = platforms.values().find(|p| p.bytes == entry.bytes) {
                return Err(PlatformError::DuplicateSignature {
                    first: existing.name.clone(),
                    second: entry.name,
                });
            }
            platforms.insert(entry.name.clone(), entry);
        }

        Ok(Self { platforms })
    }

    /// The built-in Unity 5.5 platform table
    pub fn builtin() -> Self {
        let platforms = BUILTIN_PLATFORMS
            .iter()
            .map(|(name, bytes)| {
                (
                    (*name).to_string(),
                    PlatformSignature::new(*name, bytes.to_vec()),
                )
            })
            .collect();
        Self { platforms }
    }

    /// Signature registered for `name`
    pub fn signature_for(&self, name: &str) -> Result<&PlatformSignature> {
        self.platforms
            .get(name)
            .ok_or_else(|| PlatformError::unknown_platform(name))
    }

    /// Whether `name` is a registered platform
    pub fn contains(&self, name: &str) -> bool {
        self.platforms.contains_key(name)
    }

    /// Check that both platform names are registered
    pub fn validate_pair(&self, old_platform: &str, new_platform: &str) -> Result<()> {
        self.signature_for(old_platform)?;
        self.signature_for(new_platform)?;
        Ok(())
    }

    /// First registered platform whose signature occurs in `data`
    pub fn detect_platform(&self, data: &[u8]) -> Option<&str> {
        self.platforms
            .values()
            .find(|p| p.is_contained_in(data))
            .map(|p| p.name.as_str())
    }

    /// Every registered platform whose signature occurs in `data`, in registry order
    pub fn matching_platforms(&self, data: &[u8]) -> Vec<&str> {
        self.platforms
            .values()
            .filter(|p| p.is_contained_in(data))
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Platform names in registry order
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformSignature> {
        self.platforms.values()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
