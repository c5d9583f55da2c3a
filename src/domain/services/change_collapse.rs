//! # Change Collapse Service
//!
//! 同じオブジェクトに対する複数の変更を1つにまとめる

use std::collections::HashMap;

use crate::domain::entities::export_object::EntryType;
use crate::domain::entities::queue_entry::QueueEntry;

/// 変更集約サービス
///
/// バッチ内で同一オブジェクトを指すエントリを1件にまとめる
pub struct ChangeCollapseService;

impl ChangeCollapseService {
    /// オブジェクトごとに1件のエントリを返す
    ///
    /// 削除は他のどの変更よりも優先される。それ以外は最も新しいエントリ
    /// （タイムスタンプ、同値ならID）が残る。結果は最初の出現順に並ぶ
    ///
    /// # Arguments
    ///
    /// * `entries` - 集約対象のエントリ
    pub fn collapse(entries: &[QueueEntry]) -> Vec<&QueueEntry> {
        let mut order: Vec<(EntryType, &str)> = Vec::new();
        let mut winners: HashMap<(EntryType, &str), &QueueEntry> = HashMap::new();

        for entry in entries {
            let key = entry.object_key();
            match winners.get(&key).copied() {
                None => {
                    order.push(key);
                    winners.insert(key, entry);
                }
                Some(current) => {
                    if Self::supersedes(entry, current) {
                        winners.insert(key, entry);
                    }
                }
            }
        }

        order.into_iter().filter_map(|key| winners.remove(&key)).collect()
    }

    fn supersedes(candidate: &QueueEntry, current: &QueueEntry) -> bool {
        match (candidate.is_deletion(), current.is_deletion()) {
            (true, false) => true,
            (false, true) => false,
            _ => (candidate.timestamp, candidate.id) >= (current.timestamp, current.id),
        }
    }
}
