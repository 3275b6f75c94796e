use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("エントリ指定が不正: {0}")]
    InvalidEntry(String),

    #[error("入力エラーがあります: {0}")]
    InvalidForm(String),

    #[error("入力エラーが{0}件あるため送信しませんでした")]
    SubmissionBlocked(usize),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] color_forms_common::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
