// Custom error types for batch conversion
// 変換処理専用のカスタムエラー型定義

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 変換処理固有のエラー型
///
/// ファイル単位のエラー（`DecodeError` / `EncodeError` / `WriteError` / `AlreadyExists`）は
/// バッチを中断せず、各ファイルの `ConversionOutcome` に変換される。
/// それ以外は呼び出し単位のエラーで、ファイルに触れる前に返される。
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("パスが見つかりません: {}", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("デコードエラー: {} - {source}", .path.display())]
    DecodeError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("エンコードエラー: {} - {source}", .path.display())]
    EncodeError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("書き込みエラー: {} - {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("出力ファイルが既に存在します: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("ワーカープールが飽和しています (容量: {capacity})")]
    PoolSaturated { capacity: usize },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl ConversionError {
    /// パス未検出エラーの作成
    ///
    /// 存在しない明示パスはバッチから除外されるため、この値はログ出力にのみ使われる
    pub fn path_not_found(path: impl AsRef<Path>) -> Self {
        Self::PathNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// デコードエラーの作成
    pub fn decode(path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::DecodeError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// エンコードエラーの作成
    pub fn encode(path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::EncodeError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 書き込みエラーの作成
    pub fn write(path: impl AsRef<Path>, source: anyhow::Error) -> Self {
        Self::WriteError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn already_exists(path: impl AsRef<Path>) -> Self {
        Self::AlreadyExists {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn pool_saturated(capacity: usize) -> Self {
        Self::PoolSaturated { capacity }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// ファイル単位で処理されるエラーかどうか
    ///
    /// `true` の場合はバッチ結果の一部として記録され、呼び出し元には伝播しない。
    /// ライブラリ利用側が `ConversionOutcome::Failed` のエラーと呼び出し単位の
    /// エラーを区別するための判定で、クレート内部の制御には使わない。
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::DecodeError { .. }
                | Self::EncodeError { .. }
                | Self::WriteError { .. }
                | Self::AlreadyExists { .. }
        )
    }
}

/// 変換処理の結果型
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;
