//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::adapter::config::{Config, UploadTarget};
use crate::adapter::marcxml::sink::{DirectoryXmlSink, HttpXmlSink, LogXmlSink, XmlSink};
use crate::adapter::repositories::file_object_repository::FileObjectRepository;
use crate::adapter::repositories::json_queue_repository::JsonQueueRepository;
use crate::adapter::repositories::lease_task_repository::LeaseTaskRepository;
use crate::adapter::repositories::marcxml_upload_repository::MarcXmlUploadRepository;
use crate::application::use_cases::load_objects::LoadObjectsUseCase;
use crate::application::use_cases::uploader::{RunSummary, Uploader};
use crate::domain::entities::queue_entry::QueueEntry;
use crate::domain::repositories::queue_repository::QueueRepository;

use super::cli::Args;

/// Reads from the real queue but never persists processed flags
struct DryRunQueueRepository {
    inner: Arc<JsonQueueRepository>,
}

#[async_trait]
impl QueueRepository for DryRunQueueRepository {
    async fn pending_entries(&self) -> Result<Vec<QueueEntry>> {
        self.inner.pending_entries().await
    }

    async fn commit(&self, entries: &[QueueEntry]) -> Result<()> {
        println!("  Would mark {} queue entries as processed", entries.len());
        Ok(())
    }
}

/// Livesync Upload Workflow
pub struct LivesyncWorkflow {
    config: Config,
    queue_repository: Arc<JsonQueueRepository>,
    load_objects_use_case: LoadObjectsUseCase<FileObjectRepository>,
}

impl LivesyncWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let queue_repository = Arc::new(JsonQueueRepository::new(&config.queue_path));
        let load_objects_use_case =
            LoadObjectsUseCase::new(Arc::new(FileObjectRepository::new()));

        Self {
            config,
            queue_repository,
            load_objects_use_case,
        }
    }

    fn build_sink(&self, dry_run: bool) -> Arc<dyn XmlSink> {
        if dry_run {
            return Arc::new(LogXmlSink);
        }

        match &self.config.target {
            UploadTarget::Http { url, token } => {
                Arc::new(HttpXmlSink::new(url.clone(), token.clone()))
            }
            UploadTarget::Directory { path } => Arc::new(DirectoryXmlSink::new(path)),
        }
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<RunSummary> {
        info!("Starting livesync uploader...");
        info!("Dry run: {}", args.dry_run);

        println!("✓ Using configuration:");
        println!("  Agent: {}", self.config.agent_name);
        println!("  Queue: {}", self.config.queue_path);
        println!(
            "  Batch size: {} (initial: {})",
            self.config.batch_size, self.config.initial_batch_size
        );
        match &self.config.target {
            UploadTarget::Http { url, .. } => println!("  Target: {}", url),
            UploadTarget::Directory { path } => println!("  Target: directory {}", path),
        }

        let upload_repository = Arc::new(MarcXmlUploadRepository::new(self.build_sink(args.dry_run)));

        let summary = if args.dry_run {
            println!("✓ Dry-run mode (not actually uploading)");
            let queue = Arc::new(DryRunQueueRepository {
                inner: self.queue_repository.clone(),
            });
            let uploader = Uploader::new(upload_repository, queue, self.config.upload_config());
            self.run_with(&uploader, args.initial).await?
        } else {
            let mut uploader = Uploader::new(
                upload_repository,
                self.queue_repository.clone(),
                self.config.upload_config(),
            );
            if let Some(lease_path) = &self.config.task_lease_path {
                let run_id = uuid::Uuid::new_v4().to_string();
                info!("Task run id: {}", run_id);
                uploader = uploader.with_task(Arc::new(LeaseTaskRepository::new(
                    lease_path,
                    run_id,
                    self.config.runtime_extension_secs,
                )?));
            }
            self.run_with(&uploader, args.initial).await?
        };

        if summary.aborted {
            println!(
                "✗ Upload aborted after {} batches ({} records processed)",
                summary.batches_uploaded, summary.records_processed
            );
        } else {
            println!(
                "✓ Uploaded {} batches ({} records)",
                summary.batches_uploaded, summary.records_processed
            );
        }

        Ok(summary)
    }

    async fn run_with<Q: QueueRepository>(
        &self,
        uploader: &Uploader<MarcXmlUploadRepository<dyn XmlSink>, Q>,
        initial: bool,
    ) -> Result<RunSummary> {
        if initial {
            let objects = self
                .load_objects_use_case
                .execute(&self.config.objects_dir)
                .await?;
            println!(
                "✓ Loaded {} objects from {}",
                objects.len(),
                self.config.objects_dir
            );
            return uploader.run_initial(objects).await;
        }

        let entries = self.queue_repository.pending_entries().await?;
        println!("✓ Found {} pending queue entries", entries.len());

        if entries.is_empty() {
            println!("No queue entries to process. Exiting.");
            return Ok(RunSummary::default());
        }

        uploader.run(entries).await
    }
}
