// エラーハンドリングの統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::*;
use std::fs;
use tempfile::TempDir;
use webp_converter::{
    convert_files, ConversionConfig, ConversionError, ConversionOutcome, DefaultConversionEngine,
    PathResolver,
};

#[tokio::test]
async fn test_corrupt_file_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    let before = create_png(temp_dir.path(), "before.png", 4, 4);
    let broken = create_broken(temp_dir.path(), "broken.jpg");
    let after = create_jpeg(temp_dir.path(), "after.jpg");

    let unprocessed = convert_files([&before, &broken, &after], false, 80, false)
        .await
        .unwrap();

    assert_eq!(unprocessed, vec![broken.to_string_lossy().into_owned()]);
    assert!(temp_dir.path().join("before.webp").exists());
    assert!(temp_dir.path().join("after.webp").exists());
    assert!(!temp_dir.path().join("broken.webp").exists());
}

#[tokio::test]
async fn test_corrupt_file_outcome_is_decode_error() {
    let temp_dir = TempDir::new().unwrap();
    let broken = create_broken(temp_dir.path(), "broken.jpg");

    let engine = DefaultConversionEngine::default();
    let result = engine
        .convert_paths([&broken], &ConversionConfig::default())
        .await
        .unwrap();

    match &result.outcomes()[0] {
        ConversionOutcome::Failed { source, error } => {
            assert_eq!(source, &broken);
            assert!(matches!(error, ConversionError::DecodeError { .. }));
            assert!(error.is_per_file());
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_explicit_path_never_reported() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.png");

    assert!(PathResolver::resolve_explicit([&missing]).is_empty());

    let unprocessed = convert_files([&missing], false, 80, false).await.unwrap();
    assert!(unprocessed.is_empty());
}

#[tokio::test]
async fn test_unsupported_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let gif = temp_dir.path().join("animation.gif");
    fs::write(&gif, b"GIF89a").unwrap();

    let unprocessed = convert_files([&gif], false, 80, false).await.unwrap();

    assert_eq!(unprocessed.len(), 1);
    assert!(!temp_dir.path().join("animation.webp").exists());
}

#[tokio::test]
async fn test_invalid_quality_fails_before_any_file_is_touched() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "photo.png", 4, 4);

    for quality in [-5, 101, 1000] {
        let result = convert_files([&source], true, quality, false).await;
        assert!(matches!(result, Err(ConversionError::ConfigurationError { .. })));
    }

    assert!(!temp_dir.path().join("photo.webp").exists());
}

#[tokio::test]
async fn test_directory_in_place_of_output_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "photo.png", 4, 4);
    fs::create_dir(temp_dir.path().join("photo.webp")).unwrap();

    let engine = DefaultConversionEngine::default();
    let result = engine
        .convert_paths([&source], &ConversionConfig::new(true, 80, false).unwrap())
        .await
        .unwrap();

    match &result.outcomes()[0] {
        ConversionOutcome::Failed { error, .. } => {
            assert!(matches!(error, ConversionError::WriteError { .. }));
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
    assert!(temp_dir.path().join("photo.webp").is_dir());
    assert_eq!(leftover_temp_files(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_directory_in_place_of_output_without_overwrite_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "photo.png", 4, 4);
    fs::create_dir(temp_dir.path().join("photo.webp")).unwrap();

    let engine = DefaultConversionEngine::default();
    let result = engine
        .convert_paths([&source], &ConversionConfig::new(false, 80, false).unwrap())
        .await
        .unwrap();

    match &result.outcomes()[0] {
        ConversionOutcome::Failed { source: failed, error } => {
            assert_eq!(failed, &source);
            assert!(matches!(error, ConversionError::WriteError { .. }));
        }
        other => panic!("Expected Failed, got {other:?}"),
    }
    assert_eq!(result.summary().skipped, 0);
    assert!(temp_dir.path().join("photo.webp").is_dir());
    assert_eq!(leftover_temp_files(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_empty_and_missing_directories_are_not_errors() {
    let temp_dir = TempDir::new().unwrap();
    let engine = DefaultConversionEngine::default();
    let extensions = vec!["png".to_string()];

    let result = engine
        .convert_directory(temp_dir.path(), &extensions, &ConversionConfig::default())
        .await
        .unwrap();
    assert!(result.is_empty());

    let result = engine
        .convert_directory(
            temp_dir.path().join("does_not_exist"),
            &extensions,
            &ConversionConfig::default(),
        )
        .await
        .unwrap();
    assert!(result.is_empty());
}
