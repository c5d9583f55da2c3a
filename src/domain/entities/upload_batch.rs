//! # UploadBatch Value Object
//!
//! 1回のアップロード呼び出しの間だけ存在するバッチ

use super::export_object::ExportObject;
use super::queue_entry::QueueEntry;

/// アップロードバッチ
///
/// キューエントリのバッチ（`from_queue = true`）か、初回エクスポートの
/// オブジェクトのバッチ（`from_queue = false`）のどちらか
#[derive(Debug, Clone)]
pub enum UploadBatch {
    Queue(Vec<QueueEntry>),
    Initial(Vec<ExportObject>),
}

impl UploadBatch {
    /// バッチ内の要素数を返す
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            UploadBatch::Queue(entries) => entries.len(),
            UploadBatch::Initial(objects) => objects.len(),
        }
    }

    /// バッチが空かどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// キューエントリのバッチかどうか
    #[inline]
    pub fn from_queue(&self) -> bool {
        matches!(self, UploadBatch::Queue(_))
    }

    /// キューエントリの所有権を移動して返す
    pub fn into_entries(self) -> Option<Vec<QueueEntry>> {
        match self {
            UploadBatch::Queue(entries) => Some(entries),
            UploadBatch::Initial(_) => None,
        }
    }
}

impl From<Vec<QueueEntry>> for UploadBatch {
    fn from(entries: Vec<QueueEntry>) -> Self {
        UploadBatch::Queue(entries)
    }
}

impl From<Vec<ExportObject>> for UploadBatch {
    fn from(objects: Vec<ExportObject>) -> Self {
        UploadBatch::Initial(objects)
    }
}
