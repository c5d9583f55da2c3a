//! # ExportObject Entity
//!
//! 初回エクスポート対象となるドメインオブジェクト

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// オブジェクトの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Category,
    Event,
    Contribution,
    Subcontribution,
    Session,
}

impl EntryType {
    /// MARCXML の 980 フィールドに書き出す名前
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Category => "category",
            EntryType::Event => "event",
            EntryType::Contribution => "contribution",
            EntryType::Subcontribution => "subcontribution",
            EntryType::Session => "session",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 人物（講演者・著者など）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
}

/// エクスポート対象オブジェクト
///
/// キューを経由しない初回エクスポートや、キューエントリのスナップショットとして使われる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportObject {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_dt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_dt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub category_path: Vec<String>,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ExportObject {
    /// 最小限のフィールドでオブジェクトを作成
    ///
    /// # Errors
    ///
    /// IDが空の場合にエラーを返す
    pub fn new(id: String, entry_type: EntryType, title: String) -> anyhow::Result<Self> {
        if id.is_empty() {
            anyhow::bail!("Object id cannot be empty");
        }

        Ok(Self {
            id,
            entry_type,
            title,
            description: None,
            url: None,
            start_dt: None,
            end_dt: None,
            location: None,
            room: None,
            category_path: Vec::new(),
            persons: Vec::new(),
            keywords: Vec::new(),
        })
    }
}
