// エンドツーエンド統合テスト
#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use webp_converter::{
    convert_files, ConversionConfig, ConversionOutcome, DefaultConversionEngine, PathResolver,
    SkipReason, DEFAULT_EXTENSIONS,
};

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_directory_resolution_matches_extensions_case_insensitively() {
    let temp_dir = TempDir::new().unwrap();
    create_png(temp_dir.path(), "a.png", 4, 4);
    fs::write(temp_dir.path().join("b.txt"), "text").unwrap();
    create_jpeg(temp_dir.path(), "c.JPG");

    let files = PathResolver::resolve_directory(temp_dir.path(), &["png", "jpeg", "jpg"]);
    let paths: Vec<PathBuf> = files.iter().map(|f| f.path().to_path_buf()).collect();

    assert_eq!(file_names(&paths), vec!["a.png", "c.JPG"]);
    assert_eq!(DEFAULT_EXTENSIONS, &["png", "jpeg", "jpg"]);
}

#[tokio::test]
async fn test_full_directory_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("albums").join("2024");
    fs::create_dir_all(&nested).unwrap();

    create_png(temp_dir.path(), "cover.png", 32, 24);
    create_jpeg(&nested, "beach.jpeg");
    create_jpeg(&nested, "sunset.JPG");
    fs::write(temp_dir.path().join("readme.txt"), "not an image").unwrap();

    let engine = DefaultConversionEngine::default();
    let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    let result = engine
        .convert_directory(temp_dir.path(), &extensions, &ConversionConfig::default())
        .await
        .unwrap();

    let summary = result.summary();
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.converted, 3);
    assert!(result.unprocessed_files().is_empty());

    let cover = image::open(temp_dir.path().join("cover.webp")).unwrap();
    assert_eq!((cover.width(), cover.height()), (32, 24));
    assert!(nested.join("beach.webp").exists());
    assert!(nested.join("sunset.webp").exists());
    assert!(!temp_dir.path().join("readme.webp").exists());
    assert_eq!(leftover_temp_files(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_all_supported_input_formats() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        create_png(temp_dir.path(), "one.png", 8, 8),
        create_jpeg(temp_dir.path(), "two.jpg"),
        create_bmp(temp_dir.path(), "three.bmp"),
        create_ico(temp_dir.path(), "four.ico"),
    ];

    let unprocessed = convert_files(&files, false, 75, false).await.unwrap();

    assert!(unprocessed.is_empty(), "unexpected failures: {unprocessed:?}");
    for name in ["one", "two", "three", "four"] {
        let output = temp_dir.path().join(format!("{name}.webp"));
        assert!(image::open(&output).is_ok(), "{} is not a valid WebP", output.display());
    }
}

#[tokio::test]
async fn test_second_run_without_overwrite_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "photo.png", 16, 16);
    let output = temp_dir.path().join("photo.webp");

    let engine = DefaultConversionEngine::default();
    let config = ConversionConfig::new(false, 80, false).unwrap();

    let first = engine.convert_paths([&source], &config).await.unwrap();
    assert!(first.outcomes()[0].is_converted());
    let first_bytes = fs::read(&output).unwrap();

    let second = engine.convert_paths([&source], &config).await.unwrap();
    assert!(matches!(
        second.outcomes()[0],
        ConversionOutcome::Skipped {
            reason: SkipReason::AlreadyExists,
            ..
        }
    ));
    assert_eq!(second.unprocessed_files(), vec![source.clone()]);
    assert_eq!(fs::read(&output).unwrap(), first_bytes);
}

#[tokio::test]
async fn test_overwrite_reflects_latest_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "photo.png", 32, 32);
    let output = temp_dir.path().join("photo.webp");
    let engine = DefaultConversionEngine::default();

    let lossy = ConversionConfig::new(true, 5, false).unwrap();
    let first = engine.convert_paths([&source], &lossy).await.unwrap();
    assert!(first.outcomes()[0].is_converted());
    let lossy_bytes = fs::read(&output).unwrap();

    let lossless = ConversionConfig::new(true, 5, true).unwrap();
    let second = engine.convert_paths([&source], &lossless).await.unwrap();
    assert!(second.outcomes()[0].is_converted());
    let lossless_bytes = fs::read(&output).unwrap();

    assert_ne!(lossy_bytes, lossless_bytes);

    // ロスレスの出力は入力と一致する
    let decoded = image::open(&output).unwrap().to_rgb8();
    let original = image::open(&source).unwrap().to_rgb8();
    assert_eq!(decoded, original);
}

#[tokio::test]
async fn test_lossless_ignores_quality_and_is_reproducible() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "photo.png", 24, 24);
    let output = temp_dir.path().join("photo.webp");
    let engine = DefaultConversionEngine::default();

    let mut outputs = Vec::new();
    for quality in [0, 42, 100] {
        let config = ConversionConfig::new(true, quality, true).unwrap();
        let result = engine.convert_paths([&source], &config).await.unwrap();
        assert!(result.unprocessed_files().is_empty());
        outputs.push(fs::read(&output).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[1], outputs[2]);
}

#[tokio::test]
async fn test_webp_input_maps_onto_itself() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_png(temp_dir.path(), "seed.png", 8, 8);
    let engine = DefaultConversionEngine::default();
    engine
        .convert_paths([&source], &ConversionConfig::default())
        .await
        .unwrap();
    let webp = temp_dir.path().join("seed.webp");

    // 上書き無効: 出力先（自分自身）が存在するのでスキップ
    let result = engine
        .convert_paths([&webp], &ConversionConfig::new(false, 80, false).unwrap())
        .await
        .unwrap();
    assert!(result.outcomes()[0].is_skipped());

    // 上書き有効: 読み込んでから同じ名前に再エンコード
    let result = engine
        .convert_paths([&webp], &ConversionConfig::new(true, 80, true).unwrap())
        .await
        .unwrap();
    assert!(result.outcomes()[0].is_converted());
    let reencoded = image::open(&webp).unwrap();
    assert_eq!((reencoded.width(), reencoded.height()), (8, 8));
    assert_eq!(leftover_temp_files(temp_dir.path()), 0);
}

#[tokio::test]
async fn test_every_file_has_exactly_one_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let existing = create_png(temp_dir.path(), "kept.png", 4, 4);
    fs::write(temp_dir.path().join("kept.webp"), b"previous output").unwrap();

    let files = vec![
        create_png(temp_dir.path(), "new.png", 4, 4),
        existing,
        create_broken(temp_dir.path(), "broken.jpg"),
        create_jpeg(temp_dir.path(), "photo.jpeg"),
    ];

    let engine = DefaultConversionEngine::default();
    let result = engine
        .convert_paths(&files, &ConversionConfig::default())
        .await
        .unwrap();

    assert_eq!(result.len(), files.len());
    let sources: Vec<PathBuf> = result
        .outcomes()
        .iter()
        .map(|o| o.source().to_path_buf())
        .collect();
    assert_eq!(sources, files);

    let summary = result.summary();
    assert_eq!(summary.converted + summary.skipped + summary.failed, files.len());
    assert_eq!((summary.converted, summary.skipped, summary.failed), (2, 1, 1));
    assert!(result.unprocessed_files().len() <= files.len());
    assert_eq!(
        file_names(&result.unprocessed_files()),
        vec!["broken.jpg", "kept.png"]
    );

    // 既存の出力は変更されない
    assert_eq!(
        fs::read(temp_dir.path().join("kept.webp")).unwrap(),
        b"previous output"
    );
}
