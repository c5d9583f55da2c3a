//! # Upload Configuration DTO
//!
//! アップローダ設定のData Transfer Object

/// キューエントリのデフォルトバッチサイズ
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// 初回エクスポートのデフォルトバッチサイズ
pub const DEFAULT_INITIAL_BATCH_SIZE: usize = 100;

/// アップロード設定
///
/// バッチ分割とログ出力に必要な設定情報
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// ログの接頭辞に使うエージェント名
    pub agent_name: String,
    /// 1回に処理するキューエントリ数
    pub batch_size: usize,
    /// 初回エクスポートで1回に処理するオブジェクト数
    pub initial_batch_size: usize,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use livesync::application::dto::upload_config::UploadConfig;
    ///
    /// let config = UploadConfig::new("MARCXMLUploader".to_string(), 50, 200);
    ///
    /// assert_eq!(config.batch_size, 50);
    /// assert_eq!(config.initial_batch_size, 200);
    /// ```
    pub fn new(agent_name: String, batch_size: usize, initial_batch_size: usize) -> Self {
        Self {
            agent_name,
            batch_size,
            initial_batch_size,
        }
    }
}
