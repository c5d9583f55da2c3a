//! MARCXML Upload Repository Implementation
//!
//! UploadRepositoryのMARCXML実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::adapter::marcxml::generator::MarcXmlGenerator;
use crate::adapter::marcxml::sink::XmlSink;
use crate::domain::entities::upload_batch::UploadBatch;
use crate::domain::repositories::upload_repository::UploadRepository;

/// MARCXMLアップロードリポジトリ
///
/// バッチをMARCXMLに変換し、XMLシンクへ渡す
pub struct MarcXmlUploadRepository<S: XmlSink + ?Sized> {
    sink: Arc<S>,
}

impl<S: XmlSink + ?Sized> MarcXmlUploadRepository<S> {
    /// 新しいリポジトリを作成
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// バッチをXMLに変換（出力するレコードが無ければ None）
    fn to_xml(batch: &UploadBatch) -> Option<String> {
        match batch {
            UploadBatch::Queue(entries) => MarcXmlGenerator::records_to_xml(entries),
            UploadBatch::Initial(objects) => MarcXmlGenerator::objects_to_xml(objects),
        }
    }
}

#[async_trait]
impl<S: XmlSink + ?Sized> UploadRepository for MarcXmlUploadRepository<S> {
    async fn upload_records(&self, batch: &UploadBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        debug!(
            "Rendering {} batch of {} records",
            if batch.from_queue() { "queue" } else { "initial" },
            batch.len()
        );

        match Self::to_xml(batch) {
            Some(xml) => self
                .sink
                .upload_xml(xml)
                .await
                .context("Failed to upload MARCXML"),
            None => {
                debug!("Nothing to upload for batch of {} records", batch.len());
                Ok(())
            }
        }
    }
}
