//! 注文フォームの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ItemId: 明細行の安定ID（配列インデックスとは独立）
//! - OrderStatus: 明細の処理状況
//! - ImageAsset: Data URL形式の添付画像
//! - LineItemValues / OrderValues: 検証・送信に渡すシリアライズ可能な値

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 明細行の安定ID
///
/// 行の追加・削除でインデックスがずれても変わらない。削除後に再利用されることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// 明細の処理状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// 未処理（初期値）
    #[default]
    Unprocessed,
    /// 処理済み
    Processed,
    /// 発注待ち
    AwaitingOrder,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Unprocessed,
        OrderStatus::Processed,
        OrderStatus::AwaitingOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Unprocessed => "unprocessed",
            OrderStatus::Processed => "processed",
            OrderStatus::AwaitingOrder => "awaitingOrder",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Unprocessed => "未処理",
            OrderStatus::Processed => "処理済み",
            OrderStatus::AwaitingOrder => "発注待ち",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 添付画像（自己完結したData URL）
///
/// ファイル名やサイズは保持しない。表示に必要なペイロードのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageAsset(String);

impl ImageAsset {
    /// 検証なしで生成（テストや既存データの読み込み用）
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    /// `data:image/...;base64,...` 形式のみ受け付ける
    pub fn from_data_url(data_url: impl Into<String>) -> Result<Self> {
        let data_url = data_url.into();
        let is_image = data_url
            .strip_prefix("data:")
            .map(|rest| rest.starts_with("image/") && rest.contains(','))
            .unwrap_or(false);
        if !is_image {
            let head: String = data_url.chars().take(32).collect();
            return Err(Error::InvalidDataUrl(head));
        }
        Ok(Self(data_url))
    }

    /// MIMEタイプとBase64本文からData URLを組み立てる
    pub fn from_base64(mime_type: &str, base64: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, base64))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Data URLからMIMEタイプを抽出（例: "image/png"）
    pub fn mime_type(&self) -> Option<&str> {
        self.0
            .strip_prefix("data:")
            .and_then(|s| s.split([';', ',']).next())
            .filter(|s| !s.is_empty())
    }

    /// Data URLからBase64データ部分を抽出
    pub fn base64_data(&self) -> Option<&str> {
        self.0.split_once(',').map(|(_, data)| data)
    }
}

/// 明細1行分の値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemValues {
    pub product_name: String,
    pub unit: String,
    /// 0や負数も入力途中の値として保持し、検証で弾く
    pub quantity: i64,
    pub status: OrderStatus,
    pub images: Vec<ImageAsset>,
}

impl Default for LineItemValues {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            unit: String::new(),
            quantity: 1,
            status: OrderStatus::default(),
            images: Vec::new(),
        }
    }
}

/// 注文フォーム全体の値（検証・送信に渡す）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderValues {
    pub company_id: String,
    pub received_date: String,
    pub items: Vec<LineItemValues>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_values_default() {
        let values = LineItemValues::default();
        assert_eq!(values.product_name, "");
        assert_eq!(values.quantity, 1);
        assert_eq!(values.status, OrderStatus::Unprocessed);
        assert!(values.images.is_empty());
    }

    #[test]
    fn test_order_values_serialize() {
        let order = OrderValues {
            company_id: "cty01".to_string(),
            received_date: "2026-10-18".to_string(),
            items: vec![LineItemValues {
                product_name: "ボルト".to_string(),
                unit: "個".to_string(),
                quantity: 5,
                status: OrderStatus::AwaitingOrder,
                images: vec![ImageAsset::new("data:image/png;base64,AAAA")],
            }],
        };

        let json = serde_json::to_string(&order).expect("シリアライズ失敗");
        assert!(json.contains("\"companyId\":\"cty01\""));
        assert!(json.contains("\"receivedDate\":\"2026-10-18\""));
        assert!(json.contains("\"productName\":\"ボルト\""));
        assert!(json.contains("\"status\":\"awaitingOrder\""));
        assert!(json.contains("\"images\":[\"data:image/png;base64,AAAA\"]"));
    }

    #[test]
    fn test_order_values_deserialize_missing_fields() {
        let json = r#"{"companyId": "cty02", "items": [{"productName": "ナット"}]}"#;

        let order: OrderValues = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(order.company_id, "cty02");
        assert_eq!(order.received_date, "");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_name, "ナット");
        assert_eq!(order.items[0].quantity, 1); // デフォルト値
        assert_eq!(order.items[0].status, OrderStatus::Unprocessed);
    }

    #[test]
    fn test_status_from_str_accepts_key_and_label() {
        assert_eq!("processed".parse::<OrderStatus>(), Ok(OrderStatus::Processed));
        assert_eq!("発注待ち".parse::<OrderStatus>(), Ok(OrderStatus::AwaitingOrder));
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_image_asset_data_url_parts() {
        let asset = ImageAsset::from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(asset.mime_type(), Some("image/jpeg"));
        assert_eq!(asset.base64_data(), Some("/9j/4AAQ"));
    }

    #[test]
    fn test_image_asset_rejects_non_image() {
        assert!(ImageAsset::from_data_url("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(ImageAsset::from_data_url("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_image_asset_from_base64() {
        let asset = ImageAsset::from_base64("image/png", "iVBORw0K");
        assert_eq!(asset.as_str(), "data:image/png;base64,iVBORw0K");
    }

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::new(7).to_string(), "item-7");
    }
}
