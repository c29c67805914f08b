//! Single-file conversion and inspection tests

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use unity_platform_binary::{BundlePatcher, ConversionOutcome, Converter, OutputPolicy};
use unity_platform_core::{PlatformError, PlatformSignature, SignatureRegistry};

const BUNDLE_ID: &str = "CAB-5d1c8f0e9a7b6c5d4e3f2a1b0c9d8e7f";

fn win_android() -> SignatureRegistry {
    SignatureRegistry::new(vec![
        PlatformSignature::new("Win", vec![0x05, 0x00, 0x00, 0x00]),
        PlatformSignature::new("Android", vec![0x0D, 0x00, 0x00, 0x00]),
    ])
    .unwrap()
}

/// A fake UnityFS bundle declaring the given platform signature
fn fake_bundle(signature: &[u8]) -> Vec<u8> {
    let mut data = b"UnityFS\0\0\0\0\x06".to_vec();
    data.extend_from_slice(b"5.x.x\x005.5.5f1\0");
    data.extend_from_slice(signature);
    data.extend_from_slice(&[0x01, 0xFF, 0x7E]);
    data.extend_from_slice(BUNDLE_ID.as_bytes());
    data.extend_from_slice(&[0x00; 8]);
    data
}

fn write_bundle(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_end_to_end_derived_path() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.unity3d", b"\x00\x01\x05\x00\x00\x00\xFF");
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(&source, "Win", "Android", &OutputPolicy::DeriveNewPath)
        .unwrap();

    let expected_output = dir.path().join("level_modified.unity3d");
    assert_eq!(result.outcome, ConversionOutcome::Success);
    assert_eq!(result.output_path.as_deref(), Some(expected_output.as_path()));
    assert!(result.message.contains("level_modified.unity3d"));
    assert_eq!(
        fs::read(&expected_output).unwrap(),
        b"\x00\x01\x0D\x00\x00\x00\xFF"
    );
    // Source untouched
    assert_eq!(fs::read(&source).unwrap(), b"\x00\x01\x05\x00\x00\x00\xFF");
}

#[cfg(unix)]
#[test]
fn test_non_utf8_name_keeps_source() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let original = b"\x00\x01\x05\x00\x00\x00\xFF";
    let source = dir.path().join(OsStr::from_bytes(b"lev\xFFel.unity3d"));
    fs::write(&source, original).unwrap();
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(&source, "Win", "Android", &OutputPolicy::DeriveNewPath)
        .unwrap();

    let expected_output = dir.path().join(OsStr::from_bytes(b"lev\xFFel_modified.unity3d"));
    assert_eq!(result.outcome, ConversionOutcome::Success);
    assert_eq!(result.output_path.as_deref(), Some(expected_output.as_path()));
    assert_eq!(
        fs::read(&expected_output).unwrap(),
        b"\x00\x01\x0D\x00\x00\x00\xFF"
    );
    assert_eq!(fs::read(&source).unwrap(), original);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_every_builtin_pair_patches_in_place() {
    let registry = SignatureRegistry::builtin();
    let patcher = BundlePatcher::new(&registry);
    let prefix = b"UnityFS\0\0\0\0\x06".to_vec();
    let suffix = [0x01, 0xFF, 0x7E, 0x00];

    for from in registry.iter() {
        for to in registry.iter().filter(|p| p.name != from.name) {
            let mut original = prefix.clone();
            original.extend_from_slice(&from.bytes);
            original.extend_from_slice(&suffix);

            let patched = patcher.patch(&original, &from.name, &to.name).unwrap();
            assert_eq!(patched.offset(), prefix.len(), "{} -> {}", from, to);
            assert_eq!(&patched.bytes[..prefix.len()], prefix.as_slice());
            assert_eq!(
                &patched.bytes[prefix.len()..prefix.len() + to.len()],
                to.bytes.as_slice()
            );
            assert_eq!(&patched.bytes[prefix.len() + to.len()..], &suffix);

            let restored = patcher.patch(&patched.bytes, &to.name, &from.name).unwrap();
            assert_eq!(restored.offset(), prefix.len());
            assert_eq!(restored.bytes, original, "{} -> {} -> {}", from, to, from);
        }
    }
}

#[test]
fn test_signature_not_found_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.unity3d", &fake_bundle(&[0x09, 0, 0, 0]));
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(&source, "Win", "Android", &OutputPolicy::DeriveNewPath)
        .unwrap();

    assert_eq!(result.outcome, ConversionOutcome::SignatureNotFound);
    assert!(result.output_path.is_none());
    assert!(result.message.contains("Platform signature not found"));
    assert!(!dir.path().join("level_modified.unity3d").exists());
}

#[test]
fn test_already_converted_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.unity3d", &fake_bundle(&[0x0D, 0, 0, 0]));
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(&source, "Win", "Android", &OutputPolicy::OverwriteInPlace)
        .unwrap();

    assert_eq!(result.outcome, ConversionOutcome::SignatureNotFound);
    assert!(result.message.contains("already declares 'Android'"));
}

#[test]
fn test_unknown_platform_is_an_error_before_io() {
    let registry = win_android();
    let converter = Converter::new(&registry);

    // The file does not exist; the platform check must fail first
    let err = converter
        .convert_one(
            "does/not/exist.unity3d",
            "Win",
            "PS4",
            &OutputPolicy::DeriveNewPath,
        )
        .unwrap_err();
    assert!(matches!(err, PlatformError::UnknownPlatform { .. }));
}

#[test]
fn test_missing_file_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(
            dir.path().join("missing.unity3d"),
            "Win",
            "Android",
            &OutputPolicy::DeriveNewPath,
        )
        .unwrap();
    assert_eq!(result.outcome, ConversionOutcome::IoFailure);
    assert!(result.message.contains("missing.unity3d"));
}

#[test]
fn test_non_unity3d_extension_overwrites_source() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.bundle", &fake_bundle(&[0x05, 0, 0, 0]));
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(&source, "Win", "Android", &OutputPolicy::DeriveNewPath)
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.output_path.as_deref(), Some(source.as_path()));
    assert_eq!(fs::read(&source).unwrap(), fake_bundle(&[0x0D, 0, 0, 0]));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_copy_into_other_directory() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.unity3d", &fake_bundle(&[0x05, 0, 0, 0]));
    let out_dir = dir.path().join("android");
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(
            &source,
            "Win",
            "Android",
            &OutputPolicy::CopyInto(out_dir.clone()),
        )
        .unwrap();

    assert!(result.is_success());
    assert_eq!(
        fs::read(out_dir.join("level.unity3d")).unwrap(),
        fake_bundle(&[0x0D, 0, 0, 0])
    );
    assert_eq!(fs::read(&source).unwrap(), fake_bundle(&[0x05, 0, 0, 0]));
}

#[test]
fn test_convert_detected() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.unity3d", &fake_bundle(&[0x05, 0, 0, 0]));
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_detected(&source, "Android", &OutputPolicy::OverwriteInPlace)
        .unwrap();
    assert!(result.is_success());
    assert_eq!(fs::read(&source).unwrap(), fake_bundle(&[0x0D, 0, 0, 0]));

    // Second run: already on the target platform
    let again = converter
        .convert_detected(&source, "Android", &OutputPolicy::OverwriteInPlace)
        .unwrap();
    assert_eq!(again.outcome, ConversionOutcome::Skipped);
}

#[test]
fn test_convert_detected_without_known_signature() {
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "level.unity3d", &fake_bundle(&[0x2A, 0, 0, 0]));
    let registry = win_android();
    let converter = Converter::new(&registry);

    let result = converter
        .convert_detected(&source, "Android", &OutputPolicy::OverwriteInPlace)
        .unwrap();
    assert_eq!(result.outcome, ConversionOutcome::SignatureNotFound);
}

#[test]
fn test_inspect() {
    let dir = TempDir::new().unwrap();
    let data = fake_bundle(&[0x05, 0, 0, 0]);
    let source = write_bundle(dir.path(), "level.unity3d", &data);
    let registry = win_android();
    let converter = Converter::new(&registry);

    let inspection = converter.inspect(&source).unwrap();
    assert_eq!(inspection.detected_platform.as_deref(), Some("Win"));
    assert_eq!(inspection.bundle_identifier.as_deref(), Some(BUNDLE_ID));
    assert_eq!(inspection.size, data.len());

    let plain = write_bundle(dir.path(), "plain.bin", b"nothing to see");
    let inspection = converter.inspect(&plain).unwrap();
    assert_eq!(inspection.detected_platform, None);
    assert_eq!(inspection.bundle_identifier, None);

    let err = converter.inspect(dir.path().join("missing.unity3d")).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_length_changing_signatures() {
    let registry = SignatureRegistry::new(vec![
        PlatformSignature::new("Short", vec![0xAA]),
        PlatformSignature::new("Long", vec![0xBB, 0xCC, 0xDD]),
    ])
    .unwrap();
    let dir = TempDir::new().unwrap();
    let source = write_bundle(dir.path(), "x.unity3d", &[0x01, 0xAA, 0x02, 0xAA]);
    let converter = Converter::new(&registry);

    let result = converter
        .convert_one(&source, "Short", "Long", &OutputPolicy::OverwriteInPlace)
        .unwrap();
    assert!(result.is_success());
    assert_eq!(
        fs::read(&source).unwrap(),
        vec![0x01, 0xBB, 0xCC, 0xDD, 0x02, 0xAA]
    );
}

#[test]
fn test_list_platforms() {
    let registry = SignatureRegistry::builtin();
    let converter = Converter::new(&registry);
    assert_eq!(
        converter.list_platforms(),
        vec!["StandaloneWindows 5", "StandaloneWindows64 19", "Android"]
    );
}
