//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **Uploader**: バッチ分割、アップロード、処理済みマーク
//! - **LoadObjectsUseCase**: 初回エクスポート対象の読み込み

pub mod load_objects;
pub mod uploader;
