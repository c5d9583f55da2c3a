//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **QueueEntry**: 同期待ちのキューエントリ
//! - **ExportObject**: 初回エクスポート対象のオブジェクト
//! - **UploadBatch**: アップロードバッチのバリューオブジェクト

pub mod export_object;
pub mod queue_entry;
pub mod upload_batch;
