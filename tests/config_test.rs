//! 設定ファイルテスト

use order_form::config::Config;
use order_form_common::company::builtin_companies;
use std::path::PathBuf;
use tempfile::tempdir;

/// 設定ファイルが無ければデフォルト
#[test]
fn test_load_missing_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert!(config.companies_path.is_none());
    assert_eq!(config.max_image_size, 1600);
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        companies_path: Some(PathBuf::from("/data/companies.json")),
        max_image_size: 800,
        default_output: Some(PathBuf::from("order.json")),
    };
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.companies_path, config.companies_path);
    assert_eq!(loaded.max_image_size, 800);
    assert_eq!(loaded.default_output, config.default_output);
}

/// 一部の項目だけの設定ファイル
#[test]
fn test_load_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"max_image_size": 0}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.max_image_size, 0);
    assert!(config.default_output.is_none());
}

/// 会社リスト: 未設定なら組み込み、ファイル指定ならそちら
#[test]
fn test_companies_source() {
    let config = Config::default();
    assert_eq!(config.companies(None).unwrap(), builtin_companies());

    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("companies.json");
    std::fs::write(&path, r#"[{"id":"k1","name":"北海物産"},{"id":"k2","name":"南洋通商"}]"#).unwrap();

    let companies = config.companies(Some(&path)).unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[1].name, "南洋通商");
}
