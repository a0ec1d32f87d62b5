// 並列処理の設定管理

use crate::core::{ConversionError, ConversionResult};

/// 並列処理の設定を抽象化するトレイト
pub trait ProcessingConfig: Send + Sync {
    /// 最大同時実行タスク数を取得
    fn max_concurrent_tasks(&self) -> usize;

    /// チャンネルバッファサイズを取得
    fn channel_buffer_size(&self) -> usize;

    /// ファイルに触れる前に設定を検証
    fn validate(&self) -> ConversionResult<()> {
        if self.max_concurrent_tasks() == 0 {
            return Err(ConversionError::configuration(
                "並列タスク数は1以上である必要があります",
            ));
        }

        if self.channel_buffer_size() == 0 {
            return Err(ConversionError::configuration(
                "バッファサイズは1以上である必要があります",
            ));
        }

        Ok(())
    }
}

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultProcessingConfig {
    max_concurrent: usize,
    buffer_size: usize,
}

impl DefaultProcessingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}

impl Default for DefaultProcessingConfig {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get().max(1),
            buffer_size: 100,
        }
    }
}

impl ProcessingConfig for DefaultProcessingConfig {
    fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent
    }

    fn channel_buffer_size(&self) -> usize {
        self.buffer_size
    }
}
