use super::{EncodeSettings, WebPEncoderBackend};
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use webp::Encoder;

/// libwebp を使った WebP エンコーダー
#[derive(Clone, Debug, Default)]
pub struct LibWebPEncoder;

impl LibWebPEncoder {
    pub fn new() -> Self {
        Self
    }

    /// 同期的にエンコードする
    ///
    /// アルファチャンネルを持つ画像は RGBA、それ以外は RGB として渡す。
    pub fn encode_blocking(image: &DynamicImage, settings: EncodeSettings) -> Result<Vec<u8>> {
        let (width, height) = (image.width(), image.height());

        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            encode_pixels(Encoder::from_rgba(rgba.as_raw(), width, height), settings)
        } else {
            let rgb = image.to_rgb8();
            encode_pixels(Encoder::from_rgb(rgb.as_raw(), width, height), settings)
        }
    }
}

fn encode_pixels(encoder: Encoder<'_>, settings: EncodeSettings) -> Result<Vec<u8>> {
    let memory = encoder
        .encode_simple(settings.lossless, f32::from(settings.quality))
        .map_err(|e| anyhow::anyhow!("libwebp encoding failed: {e:?}"))?;
    Ok(memory.to_vec())
}

#[async_trait]
impl WebPEncoderBackend for LibWebPEncoder {
    async fn encode(&self, image: DynamicImage, settings: EncodeSettings) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || Self::encode_blocking(&image, settings))
            .await
            .context("Failed to spawn blocking task for WebP encoding")?
    }

    fn encoder_name(&self) -> &'static str {
        "libwebp"
    }
}
