//! # Livesync
//!
//! キューに溜まった変更（または初回エクスポートのオブジェクト）を固定サイズのバッチで
//! リモートのインデックスサービスへアップロードし、成功したキューエントリを処理済みにするツール
//!
//! クリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: キューエントリ、バッチ分割などの核心的なルール（外部依存なし）
//! - **Application層**: アップローダ（分割 → アップロード → 処理済みマーク）
//! - **Adapter層**: MARCXML生成、送信先、JSONキューなど外部システムとの統合
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
