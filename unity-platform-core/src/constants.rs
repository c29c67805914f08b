//! Constants for Unity AssetBundle platform conversion
//!
//! Built-in platform signatures, the bundle identifier pattern and
//! the naming rules used when writing converted bundles.

/// Built-in platform table, in detection order.
///
/// Signatures are the little-endian `BuildTarget` value as it appears
/// near the start of Unity 5.5 AssetBundles.
pub const BUILTIN_PLATFORMS: &[(&str, &[u8])] = &[
    ("StandaloneWindows 5", &[0x05, 0x00, 0x00, 0x00]),
    ("StandaloneWindows64 19", &[0x13, 0x00, 0x00, 0x00]),
    ("Android", &[0x0D, 0x00, 0x00, 0x00]),
];

/// Default source platform offered by front-ends
pub const DEFAULT_SOURCE_PLATFORM: &str = "StandaloneWindows 5";

/// Default target platform offered by front-ends
pub const DEFAULT_TARGET_PLATFORM: &str = "Android";

/// Extension of AssetBundle files, matched exactly when deriving output names
pub const BUNDLE_EXTENSION: &str = ".unity3d";

/// Suffix inserted before [`BUNDLE_EXTENSION`] for non-destructive conversion
pub const MODIFIED_SUFFIX: &str = "_modified";

/// Prefix of the embedded bundle identifier
pub const BUNDLE_ID_PREFIX: &str = "CAB-";

/// Number of lowercase hex characters following [`BUNDLE_ID_PREFIX`]
pub const BUNDLE_ID_HEX_LEN: usize = 32;

/// Unity version the built-in signatures were taken from
pub const SUPPORTED_UNITY_VERSION: &str = "5.5.5f1";
