//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - フレームワークに依存しない
//! - キューの保存先やアップロード先について何も知らない
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（QueueEntry, UploadBatchなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（バッチ分割）

pub mod entities;
pub mod repositories;
pub mod services;
