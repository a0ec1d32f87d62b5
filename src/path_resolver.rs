use crate::core::{ConversionError, SourceFile};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// ディレクトリ走査時の既定の対象拡張子
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg"];

/// ユーザーの選択から変換対象のファイル一覧を作る
pub struct PathResolver;

impl PathResolver {
    /// 明示的に指定されたパスを検証する
    ///
    /// 存在しないパスや通常ファイルでないパスは黙って除外する（バッチの失敗にはならない）。
    /// 順序と重複はそのまま保持する。
    pub fn resolve_explicit<I, P>(paths: I) -> Vec<SourceFile>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .filter_map(|path| {
                let path = path.as_ref();
                let source = SourceFile::from_path(path);
                if source.is_none() {
                    let reason = ConversionError::path_not_found(path);
                    debug!("Dropping path from batch: {reason}");
                }
                source
            })
            .collect()
    }

    /// `root` 以下を再帰的に走査し、拡張子が一致するファイルを集める
    ///
    /// 拡張子の比較は大文字小文字を区別しない。`root` が存在しない場合や
    /// 空の場合は空の一覧を返す。同じファイルシステム状態なら順序は常に同じ。
    pub fn resolve_directory<S>(root: impl AsRef<Path>, extensions: &[S]) -> Vec<SourceFile>
    where
        S: AsRef<str>,
    {
        let root = root.as_ref();
        if !root.is_dir() {
            debug!("Directory not found, nothing to resolve: {}", root.display());
            return Vec::new();
        }

        let extensions = normalize_extensions(extensions);
        let mut files = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(extension) = entry.path().extension() {
                let ext = extension.to_string_lossy().to_lowercase();
                if extensions.contains(&ext) {
                    files.push(SourceFile::new(entry.into_path()));
                }
            }
        }

        debug!("Resolved {} files under {}", files.len(), root.display());
        files
    }

    /// 既定の拡張子（png / jpeg / jpg）でディレクトリを走査
    pub fn resolve_directory_default(root: impl AsRef<Path>) -> Vec<SourceFile> {
        Self::resolve_directory(root, DEFAULT_EXTENSIONS)
    }
}

fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> HashSet<String> {
    extensions
        .iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}
