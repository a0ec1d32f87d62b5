use anyhow::Result;
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

pub mod standard;

/// 拡張子からデコーダを選択する（内容の判定は行わない）
///
/// `webp` は既に WebP のファイルを再エンコードする場合のために含める。
pub fn format_from_extension(extension: &str) -> Option<ImageFormat> {
    match extension.to_lowercase().as_str() {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "bmp" => Some(ImageFormat::Bmp),
        "ico" => Some(ImageFormat::Ico),
        "webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// 画像読み込みバックエンドのトレイト
#[async_trait]
pub trait ImageLoaderBackend: Send + Sync {
    /// ファイルパスから画像を読み込む
    async fn load_from_path(&self, path: &Path) -> Result<DynamicImage>;

    /// 読み込み戦略の名前を取得
    fn strategy_name(&self) -> &'static str;

    /// 拡張子に対応するフォーマットを取得
    fn format_for_extension(&self, extension: &str) -> Option<ImageFormat> {
        format_from_extension(extension)
    }
}
