use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::path::Path;

pub mod local;

/// 書き込みの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// 出力先に書き込んだ
    Written,
    /// 上書きしない設定で、置き換え直前に出力先が現れた
    AlreadyExists,
}

/// 出力先ストレージのトレイト
#[automock]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// 出力先が通常ファイルとして存在するかチェック
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// データを一時ファイルに書いてから出力先へ置き換える
    ///
    /// 途中で失敗しても、出力先に途中までのファイルが残ることはない。
    async fn write_atomic(&self, path: &Path, data: Vec<u8>, overwrite: bool)
        -> Result<WriteStatus>;
}
