//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_object_repository;
pub mod json_queue_repository;
pub mod lease_task_repository;
pub mod marcxml_upload_repository;
