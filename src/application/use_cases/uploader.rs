//! # Uploader Use Case
//!
//! キューエントリ（または初回エクスポートのオブジェクト）をバッチ単位でアップロードする

use anyhow::{Context, Result};
use log::{debug, error};
use std::sync::Arc;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::export_object::ExportObject;
use crate::domain::entities::queue_entry::QueueEntry;
use crate::domain::entities::upload_batch::UploadBatch;
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::repositories::upload_repository::UploadRepository;
use crate::domain::services::grouper::grouper;

/// 実行結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// アップロードに成功したバッチ数
    pub batches_uploaded: usize,
    /// アップロードに成功したレコード数
    pub records_processed: usize,
    /// バッチの失敗で途中終了したかどうか
    pub aborted: bool,
}

/// バッチアップローダ
///
/// 分割 → アップロード → 処理済みマーク を入力が尽きるか失敗するまで繰り返す
pub struct Uploader<U: UploadRepository, Q: QueueRepository> {
    upload_repository: Arc<U>,
    queue_repository: Arc<Q>,
    task_repository: Option<Arc<dyn TaskRepository>>,
    config: UploadConfig,
}

impl<U: UploadRepository, Q: QueueRepository> Uploader<U, Q> {
    /// 新しいアップローダを作成
    ///
    /// # Arguments
    ///
    /// * `upload_repository` - バッチの送り先
    /// * `queue_repository` - 処理済みフラグのコミット先
    /// * `config` - バッチサイズとエージェント名
    pub fn new(upload_repository: Arc<U>, queue_repository: Arc<Q>, config: UploadConfig) -> Self {
        Self {
            upload_repository,
            queue_repository,
            task_repository: None,
            config,
        }
    }

    /// バッチごとに実行期限を延長するタスクを設定
    pub fn with_task(mut self, task_repository: Arc<dyn TaskRepository>) -> Self {
        self.task_repository = Some(task_repository);
        self
    }

    /// キューエントリのバッチアップロードを実行
    ///
    /// 最初にアップロードに失敗したバッチでログを出して終了する。失敗したバッチと
    /// それ以降のバッチは未処理のまま残り、それ以前のバッチは処理済みのまま残る
    ///
    /// # Arguments
    ///
    /// * `records` - キューエントリ
    ///
    /// # Errors
    ///
    /// アップロード以外（コミット、期限延長）の失敗はそのまま返す
    pub async fn run<I>(&self, records: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = QueueEntry>,
    {
        let name = &self.config.agent_name;
        let mut summary = RunSummary::default();

        for (i, entries) in grouper(records, self.config.batch_size).enumerate() {
            let batch_num = i + 1;
            debug!("{} processing batch {}", name, batch_num);

            let batch = UploadBatch::from(entries);
            if let Err(e) = self.upload_records(&batch).await {
                error!("{} could not upload batch {}: {:#}", name, batch_num, e);
                summary.aborted = true;
                return Ok(summary);
            }

            let processed = self
                .processed_records(batch.into_entries().unwrap_or_default())
                .await?;
            summary.batches_uploaded += 1;
            summary.records_processed += processed.len();

            if let Some(task) = &self.task_repository {
                task.extend_runtime()
                    .await
                    .context("Failed to extend task runtime")?;
            }
        }

        Ok(summary)
    }

    /// 初回エクスポートのバッチアップロードを実行
    ///
    /// キューを経由しないので処理済みマークは行わない
    ///
    /// # Errors
    ///
    /// アップロードの失敗をそのまま返す
    pub async fn run_initial<I>(&self, objects: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = ExportObject>,
    {
        let name = &self.config.agent_name;
        let mut summary = RunSummary::default();

        for (i, objects) in grouper(objects, self.config.initial_batch_size).enumerate() {
            let batch_num = i + 1;
            debug!("{} processing initial batch {}", name, batch_num);

            let batch = UploadBatch::from(objects);
            self.upload_records(&batch)
                .await
                .with_context(|| format!("{} could not upload initial batch {}", name, batch_num))?;

            summary.batches_uploaded += 1;
            summary.records_processed += batch.len();
        }

        Ok(summary)
    }

    /// 1バッチ分のレコードをアップロード
    pub async fn upload_records(&self, batch: &UploadBatch) -> Result<()> {
        self.upload_repository.upload_records(batch).await
    }

    /// アップロードに成功したキューエントリを処理済みにしてコミット
    ///
    /// # Returns
    ///
    /// 処理済みフラグを立てたエントリ
    pub async fn processed_records(&self, mut entries: Vec<QueueEntry>) -> Result<Vec<QueueEntry>> {
        for entry in entries.iter_mut() {
            debug!("Marking as processed: {}", entry);
            entry.processed = true;
        }

        self.queue_repository
            .commit(&entries)
            .await
            .context("Failed to commit processed queue entries")?;

        Ok(entries)
    }
}
