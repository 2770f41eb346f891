//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::companies_from_json;
    use crate::types::ImageAsset;

    #[test]
    fn test_invalid_data_url_shows_head() {
        let error = ImageAsset::from_data_url("text/plain,hello").unwrap_err();
        assert!(matches!(error, Error::InvalidDataUrl(_)));
        assert_eq!(error.to_string(), "Invalid data URL: text/plain,hello");
    }

    #[test]
    fn test_invalid_data_url_truncates_long_input() {
        let long = "x".repeat(100);
        match ImageAsset::from_data_url(long) {
            Err(Error::InvalidDataUrl(head)) => assert_eq!(head.chars().count(), 32),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_company_list_is_config_error() {
        let error = companies_from_json("[]").unwrap_err();
        assert_eq!(error.to_string(), "Config error: 会社リストが空です");
    }

    #[test]
    fn test_broken_company_json_is_json_error() {
        let error = companies_from_json(r#"[{"id": "cty01"}"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }
}
