pub mod cli;
pub mod core;
pub mod encoder;
pub mod image_loader;
pub mod path_resolver;
pub mod pool;
pub mod processing;
pub mod report;
pub mod storage;

pub use crate::core::{
    BatchResult, BatchSummary, ConversionConfig, ConversionError, ConversionOutcome,
    ConversionResult, SkipReason, SourceFile,
};
pub use path_resolver::{PathResolver, DEFAULT_EXTENSIONS};
pub use pool::{BatchHandle, WorkerPool};
pub use processing::{ConversionEngine, DefaultConversionEngine};

use std::path::Path;

/// 呼び出し境界: パスと設定を受け取り、変換されなかったファイルの一覧を返す
///
/// 存在しないパスはバッチの対象外として扱われ、戻り値にも含まれない。
/// スキップと失敗は区別せず、投入順に並ぶ。
pub async fn convert_files<I, P>(
    files: I,
    overwrite: bool,
    quality: i32,
    lossless: bool,
) -> ConversionResult<Vec<String>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let config = ConversionConfig::new(overwrite, quality, lossless)?;
    let engine = DefaultConversionEngine::default();
    let result = engine.convert_paths(files, &config).await?;
    Ok(result.unprocessed_file_names())
}
