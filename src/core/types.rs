// 変換処理に関連するデータ型定義

use super::error::{ConversionError, ConversionResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 出力ファイルの拡張子
pub const OUTPUT_EXTENSION: &str = "webp";

/// 品質の上限（ロスレス時はこの値として扱う）
pub const MAX_QUALITY: u8 = 100;

/// 1回のバッチ変換に適用される設定
///
/// 作成後は変更されない。ロスレスモードでは保存された品質値に関わらず
/// 最大品質として扱われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionConfig {
    overwrite: bool,
    quality: u8,
    lossless: bool,
}

impl ConversionConfig {
    /// 入力値を検証して設定を作成
    pub fn new(overwrite: bool, quality: i32, lossless: bool) -> ConversionResult<Self> {
        let quality = u8::try_from(quality)
            .ok()
            .filter(|q| *q <= MAX_QUALITY)
            .ok_or_else(|| {
                ConversionError::configuration(format!(
                    "品質は0から{MAX_QUALITY}の範囲で指定してください (指定値: {quality})"
                ))
            })?;

        Ok(Self {
            overwrite,
            quality,
            lossless,
        })
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// 保存された品質値（ロスレス時も元の値を返す）
    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn lossless(&self) -> bool {
        self.lossless
    }

    /// エンコード時に実際に使用する品質
    pub fn effective_quality(&self) -> u8 {
        if self.lossless {
            MAX_QUALITY
        } else {
            self.quality
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            quality: 80,
            lossless: false,
        }
    }
}

/// 解決済みの変換元ファイル
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 通常ファイルとして存在する場合のみ作成
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        path.is_file().then(|| Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 同じディレクトリで拡張子を `.webp` に置き換えた出力パス
    pub fn output_path(&self) -> PathBuf {
        self.path.with_extension(OUTPUT_EXTENSION)
    }

    /// 小文字化した拡張子
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for SourceFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// スキップ理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// 出力先が既に存在し、上書きが無効
    AlreadyExists,
}

/// 個別ファイルの変換結果
///
/// 1つの入力ファイルに対して必ずいずれか1つだけが記録される。
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted { source: PathBuf, output: PathBuf },
    Skipped { source: PathBuf, reason: SkipReason },
    Failed { source: PathBuf, error: ConversionError },
}

impl ConversionOutcome {
    pub fn source(&self) -> &Path {
        match self {
            Self::Converted { source, .. }
            | Self::Skipped { source, .. }
            | Self::Failed { source, .. } => source,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// バッチ全体の集計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_processing_time_ms: u64,
}

/// 1回のバッチ変換の結果
///
/// 結果は投入順に並ぶ。呼び出し元への既定の契約は `unprocessed_files()`
/// （スキップと失敗を区別しない未処理ファイルの一覧）。
#[derive(Debug)]
pub struct BatchResult {
    outcomes: Vec<ConversionOutcome>,
    total_processing_time_ms: u64,
}

impl BatchResult {
    pub fn new(outcomes: Vec<ConversionOutcome>, total_processing_time_ms: u64) -> Self {
        Self {
            outcomes,
            total_processing_time_ms,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// 投入順の個別結果
    pub fn outcomes(&self) -> &[ConversionOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// 変換されなかった（スキップまたは失敗した）ファイルの一覧
    pub fn unprocessed_files(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_converted())
            .map(|outcome| outcome.source().to_path_buf())
            .collect()
    }

    /// 呼び出し境界向けの文字列表現
    pub fn unprocessed_file_names(&self) -> Vec<String> {
        self.unprocessed_files()
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    }

    pub fn converted_files(&self) -> Vec<PathBuf> {
        self.collect_sources(ConversionOutcome::is_converted)
    }

    pub fn skipped_files(&self) -> Vec<PathBuf> {
        self.collect_sources(ConversionOutcome::is_skipped)
    }

    pub fn failed_files(&self) -> Vec<PathBuf> {
        self.collect_sources(ConversionOutcome::is_failed)
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total_files: self.outcomes.len(),
            converted: self.outcomes.iter().filter(|o| o.is_converted()).count(),
            skipped: self.outcomes.iter().filter(|o| o.is_skipped()).count(),
            failed: self.outcomes.iter().filter(|o| o.is_failed()).count(),
            total_processing_time_ms: self.total_processing_time_ms,
        }
    }

    fn collect_sources(&self, predicate: fn(&ConversionOutcome) -> bool) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter(|outcome| predicate(outcome))
            .map(|outcome| outcome.source().to_path_buf())
            .collect()
    }
}
