use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error("入力がキャンセルされました: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] design_feedback_common::Error),
}

impl AppError {
    /// デザインが見つからないエラーか
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Common(design_feedback_common::Error::NotFound(_)))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
