//! 明細1行（ライブ値 + 画像ストア + 表示状態）

use crate::images::ImageStore;
use crate::summary::{SummarySnapshot, ViewState};
use crate::types::{ItemId, LineItemValues, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: ItemId,
    pub product_name: String,
    pub unit: String,
    pub quantity: i64,
    pub status: OrderStatus,
    pub images: ImageStore,
    view: ViewState,
}

impl LineItem {
    pub fn new(id: ItemId, initial: LineItemValues) -> Self {
        Self {
            id,
            product_name: initial.product_name,
            unit: initial.unit,
            quantity: initial.quantity,
            status: initial.status,
            images: ImageStore::from_images(initial.images),
            view: ViewState::Editing,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_collapsed(&self) -> bool {
        self.view.is_collapsed()
    }

    /// 現在のライブ値
    pub fn values(&self) -> LineItemValues {
        LineItemValues {
            product_name: self.product_name.clone(),
            unit: self.unit.clone(),
            quantity: self.quantity,
            status: self.status,
            images: self.images.images().to_vec(),
        }
    }

    /// 「完了」: 現在値を固定して折りたたむ
    ///
    /// 折りたたみ中に再度呼ぶとスナップショットを取り直す。
    pub fn finish_editing(&mut self) -> SummarySnapshot {
        let snapshot = SummarySnapshot::capture(&self.values());
        self.view = ViewState::Collapsed(snapshot.clone());
        snapshot
    }

    /// 「編集」: 編集中に戻す。ライブ値はそのまま。
    pub fn resume_editing(&mut self) {
        self.view = ViewState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageAsset;

    fn bolt() -> LineItem {
        LineItem::new(
            ItemId::new(0),
            LineItemValues {
                product_name: "Bolt".into(),
                unit: "pcs".into(),
                quantity: 5,
                status: OrderStatus::Processed,
                images: vec![ImageAsset::new("a")],
            },
        )
    }

    #[test]
    fn test_collapse_shows_snapshot() {
        let mut item = bolt();
        let snapshot = item.finish_editing();

        assert!(item.is_collapsed());
        assert_eq!(snapshot.product_name, "Bolt");
        assert_eq!(snapshot.quantity_line(), "5 pcs");
        assert_eq!(snapshot.status, OrderStatus::Processed);
        assert_eq!(snapshot.thumbnail, Some(ImageAsset::new("a")));
    }

    #[test]
    fn test_resume_preserves_live_values() {
        let mut item = bolt();
        let before = item.values();
        item.finish_editing();
        item.resume_editing();

        assert!(!item.is_collapsed());
        assert_eq!(item.values(), before);
    }

    #[test]
    fn test_snapshot_drifts_until_recollapsed() {
        let mut item = bolt();
        item.finish_editing();
        item.quantity = 9;

        let snapshot = item.view().snapshot().unwrap();
        assert_eq!(snapshot.quantity, 5);

        item.finish_editing();
        assert_eq!(item.view().snapshot().unwrap().quantity, 9);
    }
}
