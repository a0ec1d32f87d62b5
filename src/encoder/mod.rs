use crate::core::ConversionConfig;
use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;

pub mod libwebp;

/// エンコード時の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    /// 0-100 の品質（ロスレス時は圧縮の労力として使われる）
    pub quality: u8,
    pub lossless: bool,
}

impl From<&ConversionConfig> for EncodeSettings {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            quality: config.effective_quality(),
            lossless: config.lossless(),
        }
    }
}

/// WebP エンコーダーバックエンドのトレイト
#[async_trait]
pub trait WebPEncoderBackend: Send + Sync {
    /// 画像を WebP のバイト列にエンコードする
    async fn encode(&self, image: DynamicImage, settings: EncodeSettings) -> Result<Vec<u8>>;

    /// エンコーダーの名前を取得
    fn encoder_name(&self) -> &'static str;
}
