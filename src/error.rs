use order_form_common::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderFormError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("検証エラー: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Common(#[from] order_form_common::Error),
}

impl From<dialoguer::Error> for OrderFormError {
    fn from(e: dialoguer::Error) -> Self {
        OrderFormError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrderFormError>;
