// ConversionEngine - 依存性注入によるバッチ変換エンジン
// 全ての依存関係がコンストラクタで注入される

use super::config::{DefaultProcessingConfig, ProcessingConfig};
use super::pipeline::ConversionPipeline;
use crate::core::{BatchResult, ConversionConfig, ConversionError, ConversionResult, SourceFile};
use crate::encoder::{libwebp::LibWebPEncoder, WebPEncoderBackend};
use crate::image_loader::{standard::StandardImageLoader, ImageLoaderBackend};
use crate::path_resolver::PathResolver;
use crate::storage::{local::LocalStorageBackend, StorageBackend};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 標準構成のエンジン
pub type DefaultConversionEngine = ConversionEngine<
    StandardImageLoader,
    LibWebPEncoder,
    LocalStorageBackend,
    DefaultProcessingConfig,
>;

/// バッチ変換エンジン
///
/// 1回の `convert_batch` 呼び出しが1つのバッチに対応し、結果は必ず1つだけ返る。
/// ファイル単位の失敗は結果に記録され、呼び出し自体を失敗させるのは設定エラーのみ。
pub struct ConversionEngine<L, E, S, C> {
    loader: Arc<L>,
    encoder: Arc<E>,
    storage: Arc<S>,
    config: C,
}

impl<L, E, S, C> ConversionEngine<L, E, S, C>
where
    L: ImageLoaderBackend + 'static,
    E: WebPEncoderBackend + 'static,
    S: StorageBackend + 'static,
    C: ProcessingConfig,
{
    /// 新しい変換エンジンを作成
    pub fn new(loader: L, encoder: E, storage: S, config: C) -> Self {
        Self {
            loader: Arc::new(loader),
            encoder: Arc::new(encoder),
            storage: Arc::new(storage),
            config,
        }
    }

    /// 解決済みファイルを変換
    ///
    /// 設定の検証はファイルに触れる前に行う。
    pub async fn convert_batch(
        &self,
        files: Vec<SourceFile>,
        config: &ConversionConfig,
    ) -> ConversionResult<BatchResult> {
        self.config.validate()?;

        info!(
            files = files.len(),
            overwrite = config.overwrite(),
            quality = config.effective_quality(),
            lossless = config.lossless(),
            "Starting batch conversion"
        );

        let pipeline = ConversionPipeline::new(
            self.loader.clone(),
            self.encoder.clone(),
            self.storage.clone(),
        );
        let result = pipeline.execute(files, *config, &self.config).await?;

        let summary = result.summary();
        info!(
            converted = summary.converted,
            skipped = summary.skipped,
            failed = summary.failed,
            elapsed_ms = summary.total_processing_time_ms,
            "Batch conversion finished"
        );

        Ok(result)
    }

    /// 明示的に指定されたパスを変換（存在しないパスは対象外）
    pub async fn convert_paths<I, P>(
        &self,
        paths: I,
        config: &ConversionConfig,
    ) -> ConversionResult<BatchResult>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let files = PathResolver::resolve_explicit(paths);
        self.convert_batch(files, config).await
    }

    /// ディレクトリ以下の対象拡張子のファイルを変換
    pub async fn convert_directory(
        &self,
        root: impl AsRef<Path>,
        extensions: &[String],
        config: &ConversionConfig,
    ) -> ConversionResult<BatchResult> {
        self.config.validate()?;

        let root: PathBuf = root.as_ref().to_path_buf();
        let extensions = extensions.to_vec();
        let files = tokio::task::spawn_blocking(move || {
            PathResolver::resolve_directory(&root, &extensions)
        })
        .await
        .map_err(ConversionError::task)?;

        self.convert_batch(files, config).await
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }
}

impl DefaultConversionEngine {
    /// 標準構成で、同時実行数のみ指定してエンジンを作成
    pub fn with_max_concurrent(max_concurrent: usize) -> Self {
        Self::new(
            StandardImageLoader::new(),
            LibWebPEncoder::new(),
            LocalStorageBackend::new(),
            DefaultProcessingConfig::new().with_max_concurrent(max_concurrent),
        )
    }
}

impl Default for DefaultConversionEngine {
    fn default() -> Self {
        Self::new(
            StandardImageLoader::new(),
            LibWebPEncoder::new(),
            LocalStorageBackend::new(),
            DefaultProcessingConfig::default(),
        )
    }
}
