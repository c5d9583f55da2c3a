//! JSON Queue Repository Implementation
//!
//! QueueRepositoryのJSON実装（キューをJSONファイルで永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::queue_entry::QueueEntry;
use crate::domain::repositories::queue_repository::QueueRepository;

/// JSONファイルベースのキューリポジトリ
pub struct JsonQueueRepository {
    path: PathBuf,
}

/// キューファイル（JSON永続化用の内部表現）
#[derive(Debug, Default, Deserialize, Serialize)]
struct QueueFileJson {
    #[serde(default)]
    entries: Vec<QueueEntry>,
}

impl JsonQueueRepository {
    /// 新しいリポジトリを作成
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).as_ref()),
        }
    }

    /// ファイルからキューを読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<QueueFileJson> {
        if !path.exists() {
            info!("No queue file found at {}, queue is empty", path.display());
            return Ok(QueueFileJson::default());
        }

        let content = fs::read_to_string(path).context("Failed to read queue file")?;

        let queue: QueueFileJson =
            serde_json::from_str(&content).context("Failed to parse queue JSON")?;

        Ok(queue)
    }

    /// ファイルにキューを保存する（同期処理）
    fn save_sync(path: &Path, queue: &QueueFileJson) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create queue directory")?;
        }

        let json = serde_json::to_string_pretty(queue).context("Failed to serialize queue")?;

        fs::write(path, json).context("Failed to write queue file")?;

        Ok(())
    }

    /// 未処理エントリをID順に返す（同期処理）
    fn pending_sync(path: &Path) -> Result<Vec<QueueEntry>> {
        let queue = Self::load_sync(path)?;
        let mut pending: Vec<QueueEntry> =
            queue.entries.into_iter().filter(|e| !e.processed).collect();
        pending.sort_by_key(|e| e.id);

        info!("Loaded {} pending queue entries", pending.len());

        Ok(pending)
    }

    /// 処理済みフラグを反映して保存する（同期処理）
    fn commit_sync(path: &Path, processed_ids: &HashSet<u64>) -> Result<usize> {
        let mut queue = Self::load_sync(path)?;

        let known: HashSet<u64> = queue.entries.iter().map(|e| e.id).collect();
        if let Some(missing) = processed_ids.iter().find(|id| !known.contains(id)) {
            anyhow::bail!("Queue entry {} does not exist in {}", missing, path.display());
        }

        let mut marked = 0;
        for entry in queue.entries.iter_mut() {
            if processed_ids.contains(&entry.id) && !entry.processed {
                entry.processed = true;
                marked += 1;
            }
        }

        Self::save_sync(path, &queue)?;

        info!("Committed {} processed queue entries", marked);

        Ok(marked)
    }
}

#[async_trait]
impl QueueRepository for JsonQueueRepository {
    async fn pending_entries(&self) -> Result<Vec<QueueEntry>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::pending_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn commit(&self, entries: &[QueueEntry]) -> Result<()> {
        let path = self.path.clone();
        let processed_ids: HashSet<u64> = entries
            .iter()
            .filter(|e| e.processed)
            .map(|e| e.id)
            .collect();
        tokio::task::spawn_blocking(move || Self::commit_sync(&path, &processed_ids))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const QUEUE_JSON: &str = r#"{
        "entries": [
            {"id": 3, "change": "created", "type": "event", "object_id": "30", "timestamp": "2024-12-25T10:03:00Z"},
            {"id": 1, "change": "deleted", "type": "event", "object_id": "10", "timestamp": "2024-12-25T10:01:00Z"},
            {"id": 2, "change": "moved", "type": "category", "object_id": "20", "timestamp": "2024-12-25T10:02:00Z", "processed": true}
        ]
    }"#;

    fn write_queue() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(QUEUE_JSON.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_nonexistent_file() {
        let pending = JsonQueueRepository::pending_sync(Path::new("/nonexistent/queue.json"));
        assert!(pending.unwrap().is_empty());
    }

    #[test]
    fn test_pending_sorted_and_filtered() {
        let file = write_queue();

        let pending = JsonQueueRepository::pending_sync(file.path()).unwrap();

        let ids: Vec<u64> = pending.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        assert!(JsonQueueRepository::load_sync(file.path()).is_err());
    }

    #[test]
    fn test_commit_marks_entries() {
        let file = write_queue();

        let marked =
            JsonQueueRepository::commit_sync(file.path(), &HashSet::from([1, 2])).unwrap();

        // 2 は既に処理済み
        assert_eq!(marked, 1);
        let pending = JsonQueueRepository::pending_sync(file.path()).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 3);
    }

    #[test]
    fn test_commit_unknown_entry() {
        let file = write_queue();

        let result = JsonQueueRepository::commit_sync(file.path(), &HashSet::from([99]));

        assert!(result.is_err());
        // 失敗時はファイルを変更しない
        let pending = JsonQueueRepository::pending_sync(file.path()).unwrap();
        assert_eq!(pending.len(), 2);
    }

    #[tokio::test]
    async fn test_commit_only_processed_flags() {
        let file = write_queue();
        let repo = JsonQueueRepository::new(file.path().to_str().unwrap());

        let mut entries = repo.pending_entries().await.unwrap();
        entries[0].processed = true;
        repo.commit(&entries).await.unwrap();

        let pending = repo.pending_entries().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 3);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/queue.json");

        JsonQueueRepository::save_sync(&path, &QueueFileJson::default()).unwrap();

        assert!(path.exists());
        assert!(JsonQueueRepository::load_sync(&path).unwrap().entries.is_empty());
    }
}
