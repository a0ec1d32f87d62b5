use super::ImageLoaderBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 標準的な画像ローダー実装
///
/// デコードはブロッキング処理のため `spawn_blocking` で実行する。
#[derive(Clone, Debug, Default)]
pub struct StandardImageLoader;

impl StandardImageLoader {
    /// 新しい標準画像ローダーを作成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageLoaderBackend for StandardImageLoader {
    async fn load_from_path(&self, path: &Path) -> Result<DynamicImage> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let format = self
            .format_for_extension(&extension)
            .with_context(|| format!("Unsupported image format: {}", path.display()))?;

        let image = tokio::task::spawn_blocking({
            let path = path.to_path_buf();
            move || -> Result<DynamicImage> {
                let file = File::open(&path)
                    .with_context(|| format!("Failed to open file: {}", path.display()))?;
                let image = image::load(BufReader::new(file), format).with_context(|| {
                    format!(
                        "Failed to decode image with format {:?}: {}",
                        format,
                        path.display()
                    )
                })?;
                Ok(image)
            }
        })
        .await
        .context("Failed to spawn blocking task for image loading")??;

        Ok(image)
    }

    fn strategy_name(&self) -> &'static str {
        "Standard"
    }
}
