//! # Upload Repository Trait
//!
//! バッチのアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::upload_batch::UploadBatch;

/// アップロードリポジトリ
///
/// 1バッチ分のレコードをリモートのインデックスサービスへ送る
#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// バッチをアップロード
    ///
    /// `UploadBatch::Queue` ならキューエントリ、`UploadBatch::Initial` なら
    /// 初回エクスポートのオブジェクトが入っている
    ///
    /// # Arguments
    ///
    /// * `batch` - アップロードするバッチ（最大でバッチサイズ件）
    ///
    /// # Errors
    ///
    /// アップロードに失敗した場合にエラーを返す
    async fn upload_records(&self, batch: &UploadBatch) -> Result<()>;
}
