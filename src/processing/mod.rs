// バッチ変換システムのモジュール
// 機能別の構成: 設定 / 単一ファイル処理 / 並列パイプライン / エンジン

pub mod config; // 並列処理の設定
pub mod engine; // 依存性注入によるバッチ変換エンジン
pub mod pipeline; // Producer-Consumer パイプライン
pub mod worker; // 単一ファイル変換

// 公開API - 各機能から再エクスポート
pub use config::{DefaultProcessingConfig, ProcessingConfig};
pub use engine::{ConversionEngine, DefaultConversionEngine};
pub use pipeline::ConversionPipeline;
pub use worker::convert_single_file;
