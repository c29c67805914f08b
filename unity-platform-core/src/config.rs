//! Registry configuration files
//!
//! A registry can be loaded from YAML instead of the built-in table:
//!
//! ```yaml
//! platforms:
//!   - name: StandaloneWindows 5
//!     signature: "05000000"
//!   - name: Android
//!     signature: "0d 00 00 00"
//! ```
//!
//! Signatures are hex strings; whitespace between bytes is ignored.

use crate::error::{PlatformError, Result};
use crate::registry::{PlatformSignature, SignatureRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a [`SignatureRegistry`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub platforms: Vec<PlatformEntry>,
}

/// One platform entry in a registry file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub name: String,
    /// Hex-encoded signature bytes
    pub signature: String,
}

impl PlatformEntry {
    /// Decode the hex signature into a [`PlatformSignature`]
    pub fn to_signature(&self) -> Result<PlatformSignature> {
        let compact: String = self
            .signature
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = hex::decode(&compact).map_err(|e| PlatformError::InvalidSignatureHex {
            name: self.name.clone(),
            message: e.to_string(),
        })?;
        Ok(PlatformSignature::new(self.name.clone(), bytes))
    }
}

impl RegistryConfig {
    /// Parse a registry config from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| PlatformError::config(format!("Invalid registry file: {}", e)))
    }

    /// Serialize to YAML text
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PlatformError::config(format!("Failed to serialize registry: {}", e)))
    }

    /// Build and validate the registry described by this config
    pub fn into_registry(self) -> Result<SignatureRegistry> {
        if self.platforms.is_empty() {
            return Err(PlatformError::config("Registry file declares no platforms"));
        }
        let signatures = self
            .platforms
            .iter()
            .map(PlatformEntry::to_signature)
            .collect::<Result<Vec<_>>>()?;
        SignatureRegistry::new(signatures)
    }
}

impl From<&SignatureRegistry> for RegistryConfig {
    fn from(registry: &SignatureRegistry) -> Self {
        Self {
            platforms: registry
                .iter()
                .map(|p| PlatformEntry {
                    name: p.name.clone(),
                    signature: p.to_hex(),
                })
                .collect(),
        }
    }
}

impl SignatureRegistry {
    /// Load a registry from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        RegistryConfig::from_yaml_str(content)?.into_registry()
    }

    /// Load a registry from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PlatformError::io_at(path, e))?;
        Self::from_yaml_str(&content)
    }
}
