//! 明細行の配列
//!
//! 行本体はIDをキーにしたアリーナに置き、表示順は別のID列で持つ。
//! 削除でインデックスがずれても各行のIDは変わらない。
//! 0行の状態も許容する（1行以上の制約は送信時の検証で見る）。

use crate::focus::{FocusRequest, FocusScheduler};
use crate::grid::{CellCoord, CellSurface, Column};
use crate::images::DecodeTicket;
use crate::line_item::LineItem;
use crate::types::{ImageAsset, ItemId, LineItemValues, OrderStatus};
use std::collections::HashMap;

/// 削除対象の指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Id(ItemId),
    Index(usize),
}

impl From<ItemId> for RowTarget {
    fn from(id: ItemId) -> Self {
        RowTarget::Id(id)
    }
}

impl From<usize> for RowTarget {
    fn from(index: usize) -> Self {
        RowTarget::Index(index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldArray {
    rows: HashMap<ItemId, LineItem>,
    order: Vec<ItemId>,
    next_id: u64,
    focus: FocusScheduler,
}

impl FieldArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の値から組み立てる（フォーカス予約なし）
    pub fn from_values(values: impl IntoIterator<Item = LineItemValues>) -> Self {
        let mut array = Self::new();
        for initial in values {
            array.insert(initial);
        }
        array
    }

    fn insert(&mut self, initial: LineItemValues) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        self.rows.insert(id, LineItem::new(id, initial));
        self.order.push(id);
        id
    }

    /// 末尾に行を追加し、新しい行の商品名へのフォーカスを予約する
    pub fn append(&mut self, initial: LineItemValues) -> ItemId {
        let id = self.insert(initial);
        self.focus.schedule(FocusRequest { item: id, column: Column::ProductName });
        id
    }

    /// 初期値の行を追加
    pub fn append_blank(&mut self) -> ItemId {
        self.append(LineItemValues::default())
    }

    /// 行を削除する。存在しなければ何もしない。
    ///
    /// フォーカス: 最終行を消した場合は新しい最終行、それ以外は
    /// 同じ位置に繰り上がった行の商品名へ。行が残らなければ予約を取り消す。
    pub fn remove(&mut self, target: impl Into<RowTarget>) -> Option<LineItem> {
        let index = match target.into() {
            RowTarget::Id(id) => self.position_of(id)?,
            RowTarget::Index(index) if index < self.order.len() => index,
            RowTarget::Index(_) => return None,
        };

        let was_last = index + 1 == self.order.len();
        let id = self.order.remove(index);
        let removed = self.rows.remove(&id);

        let next_index = if was_last { index.checked_sub(1) } else { Some(index) };
        match next_index.and_then(|i| self.order.get(i)).copied() {
            Some(next_id) => {
                self.focus.schedule(FocusRequest { item: next_id, column: Column::ProductName });
            }
            // 行が残らない: 同じフレーム内の追加で入った予約も取り消す
            None => self.focus.cancel(),
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.order.iter().position(|&row| row == id)
    }

    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.order.get(index).copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut LineItem> {
        self.rows.get_mut(&id)
    }

    pub fn at(&self, index: usize) -> Option<&LineItem> {
        self.id_at(index).and_then(|id| self.rows.get(&id))
    }

    /// 表示順で列挙
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> + '_ {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    pub fn values(&self) -> Vec<LineItemValues> {
        self.iter().map(LineItem::values).collect()
    }

    pub fn set_product_name(&mut self, id: ItemId, value: impl Into<String>) -> bool {
        self.update(id, |item| item.product_name = value.into())
    }

    pub fn set_unit(&mut self, id: ItemId, value: impl Into<String>) -> bool {
        self.update(id, |item| item.unit = value.into())
    }

    pub fn set_quantity(&mut self, id: ItemId, value: i64) -> bool {
        self.update(id, |item| item.quantity = value)
    }

    pub fn set_status(&mut self, id: ItemId, value: OrderStatus) -> bool {
        self.update(id, |item| item.status = value)
    }

    /// 指定行を更新。行が無ければ `false`。
    pub fn update(&mut self, id: ItemId, f: impl FnOnce(&mut LineItem)) -> bool {
        match self.rows.get_mut(&id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    /// 画像を直接追加。行が削除済みなら捨てて `false`。
    pub fn attach_image(&mut self, id: ItemId, asset: ImageAsset) -> bool {
        self.update(id, |item| item.images.push(asset))
    }

    pub fn begin_decode(&mut self, id: ItemId) -> Option<DecodeTicket> {
        self.rows.get_mut(&id).map(|item| item.images.begin_decode())
    }

    /// デコード完了を該当行へ反映。行が削除済みなら結果は捨てる。
    pub fn complete_decode(
        &mut self,
        id: ItemId,
        ticket: DecodeTicket,
        decoded: Option<ImageAsset>,
    ) -> bool {
        match self.rows.get_mut(&id) {
            Some(item) => item.images.complete_decode(ticket, decoded),
            None => false,
        }
    }

    pub fn pending_focus(&self) -> Option<FocusRequest> {
        self.focus.pending()
    }

    /// 描画確定時に呼ぶ。予約を取り出し、その時点の座標に解決する。
    pub fn settle_focus(&mut self) -> Option<CellCoord> {
        let request = self.focus.take()?;
        let row = self.position_of(request.item)?;
        Some(CellCoord::new(row, request.column))
    }
}

impl CellSurface for FieldArray {
    /// 折りたたみ中の行には入力セルが無い
    fn has_cell(&self, coord: CellCoord) -> bool {
        self.at(coord.row).map(|item| !item.is_collapsed()).unwrap_or(false)
    }

    fn row_count(&self) -> usize {
        self.len()
    }
}
