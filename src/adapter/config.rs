//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::application::dto::upload_config::{
    UploadConfig, DEFAULT_BATCH_SIZE, DEFAULT_INITIAL_BATCH_SIZE,
};

fn default_agent_name() -> String {
    "MARCXMLUploader".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_initial_batch_size() -> usize {
    DEFAULT_INITIAL_BATCH_SIZE
}

fn default_runtime_extension_secs() -> u64 {
    600
}

/// タスク実行期限の延長幅の上限（1日）
pub const MAX_RUNTIME_EXTENSION_SECS: u64 = 24 * 60 * 60;

/// MARCXML の送り先
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UploadTarget {
    /// インデックスサービスのエンドポイントへPOST
    Http {
        url: String,
        #[serde(default)]
        token: Option<String>,
    },
    /// ディレクトリにバッチごとのファイルとして書き出す
    Directory { path: String },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
    pub queue_path: String,
    pub objects_dir: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_initial_batch_size")]
    pub initial_batch_size: usize,
    pub target: UploadTarget,

    // Task runtime extension
    #[serde(default)]
    pub task_lease_path: Option<String>,
    #[serde(default = "default_runtime_extension_secs")]
    pub runtime_extension_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let path = shellexpand::tilde(path).into_owned();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be greater than 0");
        }
        if self.initial_batch_size == 0 {
            anyhow::bail!("initial_batch_size must be greater than 0");
        }
        if self.runtime_extension_secs == 0
            || self.runtime_extension_secs > MAX_RUNTIME_EXTENSION_SECS
        {
            anyhow::bail!(
                "runtime_extension_secs must be between 1 and {}: {}",
                MAX_RUNTIME_EXTENSION_SECS,
                self.runtime_extension_secs
            );
        }
        if let UploadTarget::Http { url, .. } = &self.target {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("target url must start with http:// or https://: {}", url);
            }
        }
        Ok(())
    }

    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig::new(
            self.agent_name.clone(),
            self.batch_size,
            self.initial_batch_size,
        )
    }
}
