// バッチ結果のJSONレポート

use crate::core::{BatchResult, BatchSummary, ConversionConfig, ConversionOutcome, SkipReason};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// ファイルごとの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Converted,
    Skipped,
    Failed,
}

/// ファイルごとのレポート
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ConversionOutcome> for FileReport {
    fn from(outcome: &ConversionOutcome) -> Self {
        match outcome {
            ConversionOutcome::Converted { source, output } => Self {
                source: source.clone(),
                status: FileStatus::Converted,
                output: Some(output.clone()),
                skip_reason: None,
                message: None,
            },
            ConversionOutcome::Skipped { source, reason } => Self {
                source: source.clone(),
                status: FileStatus::Skipped,
                output: None,
                skip_reason: Some(*reason),
                message: None,
            },
            ConversionOutcome::Failed { source, error } => Self {
                source: source.clone(),
                status: FileStatus::Failed,
                output: None,
                skip_reason: None,
                message: Some(format!("{error:#}")),
            },
        }
    }
}

/// バッチ全体のレポート
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub config: ConversionConfig,
    pub summary: BatchSummary,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(result: &BatchResult, config: &ConversionConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            config: *config,
            summary: result.summary(),
            files: result.outcomes().iter().map(FileReport::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize batch report")
    }

    /// レポートをJSONファイルとして書き出す
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush report file: {}", path.display()))?;
        Ok(())
    }
}
