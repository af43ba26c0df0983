// TwinzoneTouch 設定エラー定義
// 設定ファイルの読み書きと検証で発生するエラー

use thiserror::Error;

/// 設定処理の結果型
pub type SettingsResult<T> = Result<T, SettingsError>;

/// 設定エラー
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/Oエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSONの解析・生成エラー
    #[error("解析エラー: {0}")]
    Parse(#[from] serde_json::Error),

    /// 値の検証エラー
    #[error("検証エラー: {0}")]
    Validation(String),
}

impl SettingsError {
    /// エラーの簡潔な説明を取得する
    pub fn brief_description(&self) -> &'static str {
        match self {
            SettingsError::Io(_) => "I/Oエラー",
            SettingsError::Parse(_) => "解析エラー",
            SettingsError::Validation(_) => "検証エラー",
        }
    }

    /// エラーのログレベルを取得する
    pub fn log_level(&self) -> log::Level {
        match self {
            SettingsError::Io(_) => log::Level::Error,
            SettingsError::Parse(_) => log::Level::Error,
            SettingsError::Validation(_) => log::Level::Warn,
        }
    }
}
