// WorkerPool - 呼び出し元が所有する、容量制限付きのバッチ実行プール
//
// 飽和時の新しいバッチは待たせずに即座に拒否する（アドミッション制御）。

use crate::core::{BatchResult, ConversionConfig, ConversionError, ConversionResult, SourceFile};
use crate::encoder::WebPEncoderBackend;
use crate::image_loader::ImageLoaderBackend;
use crate::processing::{ConversionEngine, ProcessingConfig};
use crate::storage::StorageBackend;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// 投入されたバッチの結果を一度だけ受け取るハンドル
#[derive(Debug)]
pub struct BatchHandle {
    handle: JoinHandle<ConversionResult<BatchResult>>,
}

impl BatchHandle {
    /// バッチの完了を待って結果を取得
    pub async fn join(self) -> ConversionResult<BatchResult> {
        self.handle.await.map_err(ConversionError::task)?
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// 容量と実行中のバッチ数を明示的に持つワーカープール
#[derive(Debug, Clone)]
pub struct WorkerPool {
    capacity: usize,
    admission: Arc<Semaphore>,
}

impl WorkerPool {
    /// 指定した容量のプールを作成
    pub fn new(capacity: usize) -> ConversionResult<Self> {
        if capacity == 0 {
            return Err(ConversionError::configuration(
                "プールの容量は1以上である必要があります",
            ));
        }

        Ok(Self {
            capacity,
            admission: Arc::new(Semaphore::new(capacity)),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 実行中のバッチ数
    pub fn in_flight(&self) -> usize {
        self.capacity - self.admission.available_permits()
    }

    pub fn is_saturated(&self) -> bool {
        self.admission.available_permits() == 0
    }

    /// バッチを投入する
    ///
    /// プールが飽和している場合はファイルに一切触れず `PoolSaturated` を返す。
    /// 許可はバッチのタスクが終了した時点（パニックを含む）で解放される。
    pub fn try_submit<L, E, S, C>(
        &self,
        engine: Arc<ConversionEngine<L, E, S, C>>,
        files: Vec<SourceFile>,
        config: ConversionConfig,
    ) -> ConversionResult<BatchHandle>
    where
        L: ImageLoaderBackend + 'static,
        E: WebPEncoderBackend + 'static,
        S: StorageBackend + 'static,
        C: ProcessingConfig + 'static,
    {
        let permit = self.admission.clone().try_acquire_owned().map_err(|_| {
            warn!(
                capacity = self.capacity,
                "Worker pool saturated, rejecting batch of {} files",
                files.len()
            );
            ConversionError::pool_saturated(self.capacity)
        })?;

        debug!(
            in_flight = self.in_flight(),
            capacity = self.capacity,
            "Batch admitted: {} files",
            files.len()
        );

        let handle = tokio::spawn(async move {
            let _permit = permit;
            engine.convert_batch(files, &config).await
        });

        Ok(BatchHandle { handle })
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        let capacity = num_cpus::get().max(1);
        Self {
            capacity,
            admission: Arc::new(Semaphore::new(capacity)),
        }
    }
}
