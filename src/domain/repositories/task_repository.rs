//! # Task Repository Trait
//!
//! 実行中タスクの生存通知を抽象化

use anyhow::Result;
use async_trait::async_trait;

/// タスクリポジトリ
///
/// スケジューラに対して、実行中のタスクがまだ動いていることを伝える
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// タスクの実行期限を延長する
    async fn extend_runtime(&self) -> Result<()>;
}
