//! # Queue Repository Trait
//!
//! キューエントリの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::queue_entry::QueueEntry;

/// キューリポジトリ
///
/// 同期待ちエントリの読み出しと処理済みフラグのコミットを担当するリポジトリ
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// 未処理のエントリをID順に返す
    ///
    /// # Errors
    ///
    /// ストアの読み込みに失敗した場合にエラーを返す
    async fn pending_entries(&self) -> Result<Vec<QueueEntry>>;

    /// 渡されたエントリの `processed` フラグを永続化する
    ///
    /// # Arguments
    ///
    /// * `entries` - コミットするエントリ
    ///
    /// # Errors
    ///
    /// ストアの書き込みに失敗した場合にエラーを返す
    async fn commit(&self, entries: &[QueueEntry]) -> Result<()>;
}
