// Worker - 単一ファイル変換機能

use crate::core::{ConversionConfig, ConversionError, ConversionOutcome, SkipReason, SourceFile};
use crate::encoder::{EncodeSettings, WebPEncoderBackend};
use crate::image_loader::ImageLoaderBackend;
use crate::storage::{StorageBackend, WriteStatus};
use tracing::{debug, warn};

/// 単一ファイルの変換
///
/// どのようなエラーも呼び出し元へは伝播させず、必ず1つの結果を返す。
pub async fn convert_single_file<L, E, S>(
    loader: &L,
    encoder: &E,
    storage: &S,
    source: &SourceFile,
    config: &ConversionConfig,
    worker_id: usize,
) -> ConversionOutcome
where
    L: ImageLoaderBackend + ?Sized,
    E: WebPEncoderBackend + ?Sized,
    S: StorageBackend + ?Sized,
{
    let output = source.output_path();

    let result = async {
        // 上書き無効なら既存の出力先でスキップ（エンコードは行わない）
        if !config.overwrite() {
            let exists = storage
                .exists(&output)
                .await
                .map_err(|e| ConversionError::write(&output, e))?;
            if exists {
                return Err(ConversionError::already_exists(&output));
            }
        }

        let image = loader
            .load_from_path(source.path())
            .await
            .map_err(|e| ConversionError::decode(source.path(), e))?;

        let data = encoder
            .encode(image, EncodeSettings::from(config))
            .await
            .map_err(|e| ConversionError::encode(source.path(), e))?;

        let status = storage
            .write_atomic(&output, data, config.overwrite())
            .await
            .map_err(|e| ConversionError::write(&output, e))?;

        match status {
            WriteStatus::Written => Ok(()),
            WriteStatus::AlreadyExists => Err(ConversionError::already_exists(&output)),
        }
    }
    .await;

    let source_path = source.path().to_path_buf();
    match result {
        Ok(()) => {
            debug!(worker_id, "Converted {} -> {}", source_path.display(), output.display());
            ConversionOutcome::Converted {
                source: source_path,
                output,
            }
        }
        Err(ConversionError::AlreadyExists { .. }) => {
            debug!(worker_id, "Skipped {}: {} already exists", source_path.display(), output.display());
            ConversionOutcome::Skipped {
                source: source_path,
                reason: SkipReason::AlreadyExists,
            }
        }
        Err(error) => {
            warn!(worker_id, "Failed to convert {}: {error:#}", source_path.display());
            ConversionOutcome::Failed {
                source: source_path,
                error,
            }
        }
    }
}
