// Pipeline - Producer-Consumer パイプライン
// ワーカーの完了順に関わらず、結果は投入順に並べ直して返す

use super::config::ProcessingConfig;
use super::worker::convert_single_file;
use crate::core::{
    BatchResult, ConversionConfig, ConversionError, ConversionOutcome, ConversionResult,
    SourceFile,
};
use crate::encoder::WebPEncoderBackend;
use crate::image_loader::ImageLoaderBackend;
use crate::storage::StorageBackend;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// 投入順のインデックス付き作業単位
type WorkItem = (usize, SourceFile);

/// 投入順のインデックス付き結果
type IndexedOutcome = (usize, ConversionOutcome);

/// Producer: ファイルリストを作業チャンネルへ送信
pub fn spawn_producer(
    files: Vec<SourceFile>,
    work_tx: mpsc::Sender<WorkItem>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        for item in files.into_iter().enumerate() {
            if work_tx.send(item).await.is_err() {
                // 受信側が全て終了した
                break;
            }
        }
    })
}

/// Consumers: 並列ワーカープール
///
/// 同時に変換されるファイル数は `worker_count` で決まる。
pub fn spawn_consumers<L, E, S>(
    loader: Arc<L>,
    encoder: Arc<E>,
    storage: Arc<S>,
    config: ConversionConfig,
    work_rx: mpsc::Receiver<WorkItem>,
    result_tx: mpsc::Sender<IndexedOutcome>,
    worker_count: usize,
) -> Vec<JoinHandle<()>>
where
    L: ImageLoaderBackend + 'static,
    E: WebPEncoderBackend + 'static,
    S: StorageBackend + 'static,
{
    let work_rx = Arc::new(Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            let loader = loader.clone();
            let encoder = encoder.clone();
            let storage = storage.clone();
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();

            tokio::spawn(async move {
                loop {
                    // 次の作業を取得
                    let (index, source) = {
                        let mut rx = work_rx.lock().await;
                        match rx.recv().await {
                            Some(item) => item,
                            None => break, // チャンネル終了
                        }
                    };

                    let outcome = convert_single_file(
                        loader.as_ref(),
                        encoder.as_ref(),
                        storage.as_ref(),
                        &source,
                        &config,
                        worker_id,
                    )
                    .await;

                    if result_tx.send((index, outcome)).await.is_err() {
                        break;
                    }
                }
            })
        })
        .collect()
}

/// 責任が明確に分離されたパイプライン
pub struct ConversionPipeline<L, E, S> {
    loader: Arc<L>,
    encoder: Arc<E>,
    storage: Arc<S>,
}

impl<L, E, S> ConversionPipeline<L, E, S>
where
    L: ImageLoaderBackend + 'static,
    E: WebPEncoderBackend + 'static,
    S: StorageBackend + 'static,
{
    /// 新しいパイプラインを作成
    pub fn new(loader: Arc<L>, encoder: Arc<E>, storage: Arc<S>) -> Self {
        Self {
            loader,
            encoder,
            storage,
        }
    }

    /// ファイルリストを変換
    pub async fn execute<C>(
        &self,
        files: Vec<SourceFile>,
        config: ConversionConfig,
        processing: &C,
    ) -> ConversionResult<BatchResult>
    where
        C: ProcessingConfig,
    {
        let start_time = Instant::now();
        let total_files = files.len();
        if total_files == 0 {
            return Ok(BatchResult::empty());
        }

        // Producer-Consumerチャンネル構築
        let buffer_size = processing.channel_buffer_size();
        let (work_tx, work_rx) = mpsc::channel::<WorkItem>(buffer_size);
        let (result_tx, mut result_rx) = mpsc::channel::<IndexedOutcome>(buffer_size);

        let worker_count = processing.max_concurrent_tasks().min(total_files);
        debug!("Starting pipeline: {total_files} files, {worker_count} workers");

        let producer_handle = spawn_producer(files, work_tx);
        let consumer_handles = spawn_consumers(
            self.loader.clone(),
            self.encoder.clone(),
            self.storage.clone(),
            config,
            work_rx,
            result_tx,
            worker_count,
        );

        // 完了順に届く結果を投入順のスロットに格納
        let mut slots: Vec<Option<ConversionOutcome>> =
            std::iter::repeat_with(|| None).take(total_files).collect();
        while let Some((index, outcome)) = result_rx.recv().await {
            slots[index] = Some(outcome);
        }

        producer_handle.await.map_err(ConversionError::task)?;
        for handle in consumer_handles {
            handle.await.map_err(ConversionError::task)?;
        }

        let outcomes: Vec<ConversionOutcome> = slots.into_iter().flatten().collect();
        debug_assert_eq!(outcomes.len(), total_files);

        Ok(BatchResult::new(
            outcomes,
            start_time.elapsed().as_millis() as u64,
        ))
    }
}
