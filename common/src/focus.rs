//! 構造変更後の遅延フォーカス
//!
//! 行の追加・削除の直後は対象セルがまだ描画されていないため、
//! フォーカス移動は次の描画確定時点まで保留する。保留は常に1件で、
//! 確定前に再度予約された場合は最新の予約だけが残る。

use crate::grid::Column;
use crate::types::ItemId;

/// 保留中のフォーカス先（行は位置ではなくIDで持つ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub item: ItemId,
    pub column: Column,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusScheduler {
    pending: Option<FocusRequest>,
}

impl FocusScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 予約。以前の予約を上書きした場合 `true`。
    pub fn schedule(&mut self, request: FocusRequest) -> bool {
        self.pending.replace(request).is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<FocusRequest> {
        self.pending
    }

    /// 描画確定時に1度だけ取り出す
    pub fn take(&mut self) -> Option<FocusRequest> {
        self.pending.take()
    }
}
