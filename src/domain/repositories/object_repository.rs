//! # Object Repository Trait
//!
//! 初回エクスポート対象オブジェクトの発見とパースを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::entities::export_object::ExportObject;

/// オブジェクトリポジトリ
///
/// エクスポートファイルの発見とパースを担当するリポジトリ
#[async_trait]
pub trait ObjectRepository: Send + Sync {
    /// エクスポートファイルを発見する
    ///
    /// # Arguments
    ///
    /// * `objects_dir` - エクスポートファイルを置いたディレクトリ
    ///
    /// # Returns
    ///
    /// 発見されたファイルのパスのリスト
    async fn discover_object_files(&self, objects_dir: &str) -> Result<Vec<PathBuf>>;

    /// エクスポートファイルをパースする
    ///
    /// # Arguments
    ///
    /// * `file_path` - ファイルのパス
    ///
    /// # Returns
    ///
    /// パースされたオブジェクトのリスト
    async fn parse_object_file(&self, file_path: &Path) -> Result<Vec<ExportObject>>;
}
