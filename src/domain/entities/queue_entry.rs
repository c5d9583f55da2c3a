//! # QueueEntry Entity
//!
//! 同期待ちのキューエントリ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::export_object::{EntryType, ExportObject};

/// キューに記録された変更の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Created,
    Deleted,
    Moved,
    DataChanged,
    TitleChanged,
    ProtectionChanged,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeType::Created => "created",
            ChangeType::Deleted => "deleted",
            ChangeType::Moved => "moved",
            ChangeType::DataChanged => "data_changed",
            ChangeType::TitleChanged => "title_changed",
            ChangeType::ProtectionChanged => "protection_changed",
        };
        f.write_str(name)
    }
}

/// キューエントリ
///
/// 永続化層が所有する同期単位。アップロード成功後に `processed` が立つだけで、削除はされない
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: u64,
    pub change: ChangeType,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub object_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub processed: bool,
    /// ペイロード再生成用のスナップショット（削除エントリでは通常 None）
    #[serde(default)]
    pub object: Option<ExportObject>,
}

impl QueueEntry {
    /// 未処理のキューエントリを作成
    pub fn new(
        id: u64,
        change: ChangeType,
        entry_type: EntryType,
        object_id: String,
        timestamp: DateTime<Utc>,
        object: Option<ExportObject>,
    ) -> Self {
        Self {
            id,
            change,
            entry_type,
            object_id,
            timestamp,
            processed: false,
            object,
        }
    }

    /// 同一オブジェクトを指すエントリをまとめるためのキー
    pub fn object_key(&self) -> (EntryType, &str) {
        (self.entry_type, self.object_id.as_str())
    }

    #[inline]
    pub fn is_deletion(&self) -> bool {
        self.change == ChangeType::Deleted
    }
}

impl fmt::Display for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<QueueEntry({}, {}, {} {}, processed={})>",
            self.id, self.change, self.entry_type, self.object_id, self.processed
        )
    }
}
