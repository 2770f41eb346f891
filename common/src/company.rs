//! 会社選択
//!
//! 渡された会社リストを名前の部分一致（大文字小文字を区別しない）で絞り込み、1社を選ぶ。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const COMPANY_PLACEHOLDER: &str = "会社を選択...";
pub const COMPANY_NOT_FOUND: &str = "該当する会社がありません";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// 組み込みの会社リスト（設定で差し替え可能）
pub fn builtin_companies() -> Vec<Company> {
    vec![Company::new("cty01", "A商事"), Company::new("cty02", "B工業")]
}

/// JSON文字列から読み込み
pub fn companies_from_json(json: &str) -> Result<Vec<Company>> {
    let companies: Vec<Company> = serde_json::from_str(json)?;
    if companies.is_empty() {
        return Err(Error::Config("会社リストが空です".into()));
    }
    Ok(companies)
}

/// JSONファイルから読み込み（非WASM環境のみ）
#[cfg(not(feature = "wasm"))]
pub fn load_companies(path: &std::path::Path) -> Result<Vec<Company>> {
    let content = std::fs::read_to_string(path)?;
    companies_from_json(&content)
}

/// 名前の部分一致検索（大文字小文字無視）。空クエリは全件。
pub fn search<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
    let needle = query.trim().to_lowercase();
    companies
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanySelector {
    companies: Vec<Company>,
    selected: Option<String>,
    query: String,
    open: bool,
}

impl CompanySelector {
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            companies,
            ..Self::default()
        }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// 未選択時は空文字
    pub fn selected_id(&self) -> &str {
        self.selected.as_deref().unwrap_or("")
    }

    pub fn selected_company(&self) -> Option<&Company> {
        let id = self.selected.as_deref()?;
        self.companies.iter().find(|c| c.id == id)
    }

    /// リストに無いIDは受け付けない
    pub fn select(&mut self, id: &str) -> bool {
        if !self.companies.iter().any(|c| c.id == id) {
            return false;
        }
        self.selected = Some(id.to_string());
        self.open = false;
        self.query.clear();
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// ボタン表示: 選択中の会社名、未選択ならプレースホルダ
    pub fn label(&self) -> &str {
        self.selected_company()
            .map(|c| c.name.as_str())
            .unwrap_or(COMPANY_PLACEHOLDER)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered(&self) -> Vec<&Company> {
        search(&self.companies, &self.query)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.query.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> CompanySelector {
        CompanySelector::new(vec![
            Company::new("c1", "Acme Trading"),
            Company::new("c2", "Blue Harbor"),
            Company::new("c3", "ACME Logistics"),
        ])
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let sel = selector();
        let hits: Vec<&str> = search(sel.companies(), "acme").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(hits, vec!["c1", "c3"]);
        assert_eq!(search(sel.companies(), "HARB").len(), 1);
        assert!(search(sel.companies(), "zzz").is_empty());
        assert_eq!(search(sel.companies(), "  ").len(), 3);
    }

    #[test]
    fn test_select_closes_and_labels() {
        let mut sel = selector();
        assert_eq!(sel.label(), COMPANY_PLACEHOLDER);
        assert_eq!(sel.selected_id(), "");

        sel.set_open(true);
        sel.set_query("blue");
        assert_eq!(sel.filtered().len(), 1);

        assert!(sel.select("c2"));
        assert!(!sel.is_open());
        assert_eq!(sel.query(), "");
        assert_eq!(sel.label(), "Blue Harbor");
        assert!(sel.is_selected("c2"));
    }

    #[test]
    fn test_select_unknown_id_is_rejected() {
        let mut sel = selector();
        assert!(sel.select("c1"));
        assert!(!sel.select("nope"));
        assert_eq!(sel.selected_id(), "c1");
    }

    #[test]
    fn test_companies_from_json() {
        let companies = companies_from_json(r#"[{"id":"x","name":"X社"}]"#).unwrap();
        assert_eq!(companies, vec![Company::new("x", "X社")]);
        assert!(companies_from_json("[]").is_err());
        assert!(companies_from_json("{").is_err());
    }
}
