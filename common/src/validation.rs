//! 注文フォームの入力検証
//!
//! エラーはフィールドパス（例: `items.0.quantity`）とメッセージの組で返す。

use crate::grid::Column;
use crate::types::{LineItemValues, OrderValues};
use chrono::NaiveDate;
use thiserror::Error;

pub const COMPANY_ID: &str = "companyId";
pub const RECEIVED_DATE: &str = "receivedDate";
pub const ITEMS: &str = "items";

/// 受付日の書式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 明細セルのフィールドパス
pub fn item_path(index: usize, column: Column) -> String {
    format!("{}.{}.{}", ITEMS, index, column.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// 検証エラーの集合（検出順）
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("入力エラー {} 件", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 検証スキーマ
pub trait Schema {
    fn validate(&self, order: &OrderValues) -> Result<(), ValidationErrors>;
}

/// 標準の注文スキーマ
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderSchema;

impl OrderSchema {
    fn validate_item(index: usize, item: &LineItemValues, errors: &mut ValidationErrors) {
        if item.product_name.trim().is_empty() {
            errors.push(item_path(index, Column::ProductName), "商品名は必須です");
        }
        if item.unit.trim().is_empty() {
            errors.push(item_path(index, Column::Unit), "単位は必須です");
        }
        if item.quantity < 1 {
            errors.push(item_path(index, Column::Quantity), "1以上を入力してください");
        }
    }
}

impl Schema for OrderSchema {
    fn validate(&self, order: &OrderValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if order.company_id.trim().is_empty() {
            errors.push(COMPANY_ID, "会社を選択してください");
        }

        let date = order.received_date.trim();
        if date.is_empty() {
            errors.push(RECEIVED_DATE, "受付日を選択してください");
        } else if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            errors.push(RECEIVED_DATE, "受付日の形式が不正です（YYYY-MM-DD）");
        }

        if order.items.is_empty() {
            errors.push(ITEMS, "商品を1件以上追加してください");
        }
        for (index, item) in order.items.iter().enumerate() {
            Self::validate_item(index, item, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
