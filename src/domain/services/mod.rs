//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **grouper**: 固定サイズのバッチ分割
//! - **change_collapse**: オブジェクト単位の変更集約

pub mod change_collapse;
pub mod grouper;
