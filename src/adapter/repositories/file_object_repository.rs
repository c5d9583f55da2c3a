//! File Object Repository Implementation
//!
//! ObjectRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::export_object::ExportObject;
use crate::domain::repositories::object_repository::ObjectRepository;

/// ファイルシステムベースのオブジェクトリポジトリ
///
/// 1行1オブジェクトの JSONL ファイルを読む
pub struct FileObjectRepository;

impl FileObjectRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// エクスポートファイルを発見する（内部実装）
    fn discover_object_files_internal(objects_dir: &str) -> Result<Vec<PathBuf>> {
        let expanded_path = shellexpand::tilde(objects_dir);
        let objects_dir = PathBuf::from(expanded_path.as_ref());

        if !objects_dir.exists() {
            warn!("Objects directory does not exist: {}", objects_dir.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&objects_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                files.push(path.to_path_buf());
            }
        }

        info!(
            "Found {} export files in {}",
            files.len(),
            objects_dir.display()
        );

        Ok(files)
    }

    /// エクスポートファイルをパースする（不正な行は警告してスキップ）
    fn parse_object_file_raw(file_path: &Path) -> Result<Vec<ExportObject>> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read export file: {}", file_path.display()))?;

        let mut objects = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ExportObject>(line) {
                Ok(object) => objects.push(object),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {}: {}",
                        line_num + 1,
                        file_path.display(),
                        e
                    );
                }
            }
        }

        Ok(objects)
    }
}

#[async_trait]
impl ObjectRepository for FileObjectRepository {
    async fn discover_object_files(&self, objects_dir: &str) -> Result<Vec<PathBuf>> {
        let objects_dir = objects_dir.to_string();
        tokio::task::spawn_blocking(move || Self::discover_object_files_internal(&objects_dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn parse_object_file(&self, file_path: &Path) -> Result<Vec<ExportObject>> {
        let file_path = file_path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::parse_object_file_raw(&file_path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FileObjectRepository {
    fn default() -> Self {
        Self::new()
    }
}
