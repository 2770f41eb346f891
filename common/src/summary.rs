//! 明細の表示状態（編集中 / 折りたたみ）
//!
//! 「完了」で折りたたむ時点の値をスナップショットとして固定する。
//! スナップショットは表示専用で、正となる値は常に行のライブ値。

use crate::types::{ImageAsset, LineItemValues, OrderStatus};

/// 折りたたみ時に固定した表示用の値
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySnapshot {
    pub product_name: String,
    pub unit: String,
    pub quantity: i64,
    pub status: OrderStatus,
    /// 先頭の画像のみ
    pub thumbnail: Option<ImageAsset>,
}

impl SummarySnapshot {
    pub fn capture(values: &LineItemValues) -> Self {
        Self {
            product_name: values.product_name.clone(),
            unit: values.unit.clone(),
            quantity: values.quantity,
            status: values.status,
            thumbnail: values.images.first().cloned(),
        }
    }

    /// 数量と単位（例: "5 pcs"）
    pub fn quantity_line(&self) -> String {
        if self.unit.is_empty() {
            self.quantity.to_string()
        } else {
            format!("{} {}", self.quantity, self.unit)
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

/// 明細の表示状態
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Editing,
    Collapsed(SummarySnapshot),
}

impl ViewState {
    pub fn is_collapsed(&self) -> bool {
        matches!(self, ViewState::Collapsed(_))
    }

    pub fn snapshot(&self) -> Option<&SummarySnapshot> {
        match self {
            ViewState::Editing => None,
            ViewState::Collapsed(snapshot) => Some(snapshot),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Editing => "editing",
            ViewState::Collapsed(_) => "collapsed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_takes_first_image_only() {
        let values = LineItemValues {
            product_name: "Bolt".into(),
            unit: "pcs".into(),
            quantity: 5,
            status: OrderStatus::Processed,
            images: vec![ImageAsset::new("a"), ImageAsset::new("b")],
        };
        let snapshot = SummarySnapshot::capture(&values);
        assert_eq!(snapshot.product_name, "Bolt");
        assert_eq!(snapshot.quantity_line(), "5 pcs");
        assert_eq!(snapshot.status, OrderStatus::Processed);
        assert_eq!(snapshot.thumbnail, Some(ImageAsset::new("a")));
    }

    #[test]
    fn test_quantity_line_without_unit() {
        let snapshot = SummarySnapshot::capture(&LineItemValues::default());
        assert_eq!(snapshot.quantity_line(), "1");
        assert!(snapshot.thumbnail.is_none());
    }

    #[test]
    fn test_view_state_default_is_editing() {
        let state = ViewState::default();
        assert!(!state.is_collapsed());
        assert!(state.snapshot().is_none());
        assert_eq!(state.as_str(), "editing");
    }
}
