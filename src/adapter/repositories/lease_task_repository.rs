//! Lease Task Repository Implementation
//!
//! TaskRepositoryのリースファイル実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::repositories::task_repository::TaskRepository;

/// リースファイルの内容
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaskLease {
    pub run_id: String,
    pub renewed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// リースファイルベースのタスクリポジトリ
///
/// スケジューラはリースの `expires_at` を見て、タスクがまだ生きているか判断する
pub struct LeaseTaskRepository {
    path: PathBuf,
    run_id: String,
    extension: Duration,
}

impl LeaseTaskRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Errors
    /// 延長幅が `chrono::Duration` で表せない場合
    pub fn new(path: &str, run_id: String, extension_secs: u64) -> Result<Self> {
        let extension = i64::try_from(extension_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .with_context(|| format!("Runtime extension out of range: {}s", extension_secs))?;

        Ok(Self {
            path: PathBuf::from(shellexpand::tilde(path).as_ref()),
            run_id,
            extension,
        })
    }

    /// リースを読み込む
    pub fn read_lease(path: &Path) -> Result<TaskLease> {
        let content = fs::read_to_string(path).context("Failed to read task lease")?;
        serde_json::from_str(&content).context("Failed to parse task lease")
    }

    fn write_sync(path: &Path, lease: &TaskLease) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create lease directory")?;
        }
        let json = serde_json::to_string_pretty(lease).context("Failed to serialize task lease")?;
        fs::write(path, json).context("Failed to write task lease")?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for LeaseTaskRepository {
    async fn extend_runtime(&self) -> Result<()> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.extension)
            .with_context(|| format!("Task expiry overflows: {} + {}", now, self.extension))?;
        let lease = TaskLease {
            run_id: self.run_id.clone(),
            renewed_at: now,
            expires_at,
        };
        debug!("Extending task {} until {}", lease.run_id, lease.expires_at);

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::write_sync(&path, &lease))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}
