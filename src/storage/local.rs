use super::{StorageBackend, WriteStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// ローカルファイルシステム用のストレージバックエンド
#[derive(Clone, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn write_atomic_blocking(path: &Path, data: &[u8], overwrite: bool) -> Result<WriteStatus> {
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // 出力先と同じディレクトリに作り、rename で置き換える
        let mut temp_file = tempfile::Builder::new()
            .prefix(".webp_converter")
            .suffix(".tmp")
            .tempfile_in(directory)
            .with_context(|| format!("Failed to create temporary file in: {}", directory.display()))?;

        temp_file
            .write_all(data)
            .with_context(|| format!("Failed to write temporary file for: {}", path.display()))?;
        temp_file
            .as_file()
            .sync_all()
            .with_context(|| format!("Failed to flush temporary file for: {}", path.display()))?;

        if overwrite {
            temp_file
                .persist(path)
                .map_err(|e| e.error)
                .with_context(|| format!("Failed to replace file: {}", path.display()))?;
            return Ok(WriteStatus::Written);
        }

        match temp_file.persist_noclobber(path) {
            Ok(_) => Ok(WriteStatus::Written),
            // 先に置かれていたのが通常ファイルの場合のみスキップ扱い（ディレクトリ等は失敗）
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists && is_regular_file(path) => {
                Ok(WriteStatus::AlreadyExists)
            }
            Err(e) => Err(e.error)
                .with_context(|| format!("Failed to move file into place: {}", path.display())),
        }
    }
}

fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

#[async_trait]
impl StorageBackend for LocalStorageBackend {
    async fn exists(&self, path: &Path) -> Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to get metadata for: {}", path.display()))
            }
        }
    }

    async fn write_atomic(
        &self,
        path: &Path,
        data: Vec<u8>,
        overwrite: bool,
    ) -> Result<WriteStatus> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::write_atomic_blocking(&path, &data, overwrite))
            .await
            .context("Failed to spawn blocking task for file writing")?
    }
}
