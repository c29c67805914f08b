//! Bundle identifier extraction
//!
//! Every built bundle embeds a content-derived identifier of the form
//! `CAB-` followed by 32 lowercase hex characters. Absence is a normal
//! outcome, so extraction returns `Option` rather than an error.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use unity_platform_core::{BUNDLE_ID_HEX_LEN, BUNDLE_ID_PREFIX};

static RE_BUNDLE_ID: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "{}[0-9a-f]{{{}}}",
        regex::escape(BUNDLE_ID_PREFIX),
        BUNDLE_ID_HEX_LEN
    );
    Regex::new(&pattern).expect("valid bundle identifier regex")
});

/// First bundle identifier in `data`, if any
pub fn extract_identifier(data: &[u8]) -> Option<String> {
    RE_BUNDLE_ID
        .find(data)
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

/// Whether `candidate` is a well-formed bundle identifier
pub fn is_valid_identifier(candidate: &str) -> bool {
    RE_BUNDLE_ID
        .find(candidate.as_bytes())
        .is_some_and(|m| m.start() == 0 && m.end() == candidate.len())
}
