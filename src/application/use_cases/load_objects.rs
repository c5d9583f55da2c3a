//! # Load Objects Use Case
//!
//! 初回エクスポート対象オブジェクトの読み込みユースケース

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::export_object::ExportObject;
use crate::domain::repositories::object_repository::ObjectRepository;

/// オブジェクト読み込みユースケース
///
/// 指定されたディレクトリからエクスポートファイルを発見し、全オブジェクトを読み込む
pub struct LoadObjectsUseCase<R: ObjectRepository> {
    object_repository: Arc<R>,
}

impl<R: ObjectRepository> LoadObjectsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `object_repository` - オブジェクトリポジトリ
    pub fn new(object_repository: Arc<R>) -> Self {
        Self { object_repository }
    }

    /// エクスポートファイルを発見する
    pub async fn discover(&self, objects_dir: &str) -> Result<Vec<PathBuf>> {
        self.object_repository.discover_object_files(objects_dir).await
    }

    /// 全エクスポートファイルのオブジェクトを読み込む
    ///
    /// # Arguments
    ///
    /// * `objects_dir` - エクスポートファイルのディレクトリ
    ///
    /// # Returns
    ///
    /// ファイル順に並んだオブジェクトのリスト
    ///
    /// # Errors
    ///
    /// ファイルの読み取りに失敗した場合にエラーを返す
    pub async fn execute(&self, objects_dir: &str) -> Result<Vec<ExportObject>> {
        let mut files = self.discover(objects_dir).await?;
        files.sort();

        let mut objects = Vec::new();
        for file in &files {
            objects.extend(self.object_repository.parse_object_file(file).await?);
        }

        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;

    use crate::domain::entities::export_object::EntryType;

    struct MockObjectRepository {
        files: Vec<PathBuf>,
    }

    #[async_trait]
    impl ObjectRepository for MockObjectRepository {
        async fn discover_object_files(&self, _objects_dir: &str) -> Result<Vec<PathBuf>> {
            Ok(self.files.clone())
        }

        async fn parse_object_file(&self, file_path: &Path) -> Result<Vec<ExportObject>> {
            let stem = file_path.file_stem().unwrap().to_string_lossy().to_string();
            Ok(vec![ExportObject::new(stem, EntryType::Event, "title".to_string())?])
        }
    }

    #[tokio::test]
    async fn test_load_objects_sorted_by_file() {
        let mock_repo = Arc::new(MockObjectRepository {
            files: vec![
                PathBuf::from("/path/to/b.jsonl"),
                PathBuf::from("/path/to/a.jsonl"),
            ],
        });
        let use_case = LoadObjectsUseCase::new(mock_repo);

        let objects = use_case.execute("/path/to").await.unwrap();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].id, "a");
        assert_eq!(objects[1].id, "b");
    }

    #[tokio::test]
    async fn test_load_objects_empty() {
        let mock_repo = Arc::new(MockObjectRepository { files: vec![] });
        let use_case = LoadObjectsUseCase::new(mock_repo);

        let objects = use_case.execute("/path/to/empty").await.unwrap();

        assert!(objects.is_empty());
    }
}
