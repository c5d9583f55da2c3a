//! Adapter Layer
//!
//! 外部システム（インデックスサービス, ファイルシステム）との統合

pub mod config;
pub mod marcxml;
pub mod repositories;
