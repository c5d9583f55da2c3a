//! MARCXML Sinks
//!
//! 生成したXMLの送り先の抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

pub const MARCXML_CONTENT_TYPE: &str = "application/marcxml+xml";
pub const ORIGIN_HEADER: &str = "X-Livesync-Origin";

/// Errors surfaced by the HTTP sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Trait for MARCXML upload targets
/// This enables mocking in tests while using the real endpoint in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait XmlSink: Send + Sync {
    /// Receives one MARCXML document per uploaded batch
    async fn upload_xml(&self, xml: String) -> Result<()>;
}

/// POSTs MARCXML documents to the indexing service
pub struct HttpXmlSink {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
    origin: String,
}

impl HttpXmlSink {
    pub fn new(url: String, token: Option<String>) -> Self {
        let origin = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            client: reqwest::Client::new(),
            url,
            token,
            origin,
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl XmlSink for HttpXmlSink {
    async fn upload_xml(&self, xml: String) -> Result<()> {
        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, MARCXML_CONTENT_TYPE)
            .header(ORIGIN_HEADER, &self.origin)
            .body(xml);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| SinkError::Request {
            url: self.url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Status {
                url: self.url.clone(),
                status,
                body,
            }
            .into());
        }

        info!("Uploaded MARCXML to {} ({})", self.url, status);
        Ok(())
    }
}

/// Writes each MARCXML document to its own file
pub struct DirectoryXmlSink {
    dir: PathBuf,
}

impl DirectoryXmlSink {
    pub fn new(dir: &str) -> Self {
        Self {
            dir: PathBuf::from(shellexpand::tilde(dir).as_ref()),
        }
    }

    fn write_sync(dir: &Path, xml: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).context("Failed to create output directory")?;

        let file_name = format!(
            "{}-{}.xml",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f"),
            uuid::Uuid::new_v4()
        );
        let path = dir.join(file_name);
        std::fs::write(&path, xml)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

#[async_trait]
impl XmlSink for DirectoryXmlSink {
    async fn upload_xml(&self, xml: String) -> Result<()> {
        let dir = self.dir.clone();
        let path = tokio::task::spawn_blocking(move || Self::write_sync(&dir, &xml))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        info!("Wrote MARCXML to {}", path.display());
        Ok(())
    }
}

/// Only logs the document size (dry-run)
#[derive(Default)]
pub struct LogXmlSink;

#[async_trait]
impl XmlSink for LogXmlSink {
    async fn upload_xml(&self, xml: String) -> Result<()> {
        info!(
            "DRY RUN MODE - Would upload MARCXML ({} bytes, {} records)",
            xml.len(),
            xml.matches("<record>").count()
        );
        Ok(())
    }
}
