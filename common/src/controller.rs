//! 注文フォーム全体の状態
//!
//! 会社・受付日・明細配列を持ち、キー入力の振り分け、送信時の検証と
//! 送信処理の呼び出しを行う。検証エラーは入力を消さずに保持する。

use crate::company::{Company, CompanySelector};
use crate::error::Result;
use crate::field_array::FieldArray;
use crate::grid::{self, CellCoord, KeyAction, NavKey};
use crate::types::{ItemId, LineItemValues, OrderValues};
use crate::validation::{Schema, ValidationErrors};

/// 行削除の確認文言
pub const REMOVE_ROW_PROMPT: &str = "この商品を削除してもよろしいですか？";

/// 破壊的操作の確認
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// 検証済みの注文を受け取る送信処理
pub trait Submitter {
    fn submit(&mut self, order: &OrderValues) -> Result<()>;
}

/// キー入力の結果、画面側で行うこと
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// 既定動作のまま
    Ignored,
    /// 既定動作を抑止、フォーカスはそのまま
    Absorbed,
    /// 既定動作を抑止し、すぐにフォーカス
    Focus(CellCoord),
    /// 行を追加した。フォーカスは描画確定後（`settle_focus`）
    FocusAfterSettle,
    /// 確認のうえ `confirm_remove` を呼ぶ
    ConfirmRemove(ItemId),
}

impl KeyOutcome {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Submitted(OrderValues),
    Rejected(ValidationErrors),
}

#[derive(Debug, Clone)]
pub struct OrderForm {
    company: CompanySelector,
    received_date: String,
    items: FieldArray,
    errors: ValidationErrors,
}

impl OrderForm {
    /// 明細1行を持った状態で開始する（受付日は呼び出し側の当日）
    pub fn new(companies: Vec<Company>, today: impl Into<String>) -> Self {
        Self {
            company: CompanySelector::new(companies),
            received_date: today.into(),
            items: FieldArray::from_values([LineItemValues::default()]),
            errors: ValidationErrors::new(),
        }
    }

    /// 保存済みの値から再開
    pub fn from_values(companies: Vec<Company>, values: OrderValues) -> Self {
        let mut company = CompanySelector::new(companies);
        company.select(&values.company_id);
        Self {
            company,
            received_date: values.received_date,
            items: FieldArray::from_values(values.items),
            errors: ValidationErrors::new(),
        }
    }

    pub fn company(&self) -> &CompanySelector {
        &self.company
    }

    pub fn company_mut(&mut self) -> &mut CompanySelector {
        &mut self.company
    }

    pub fn select_company(&mut self, id: &str) -> bool {
        self.company.select(id)
    }

    pub fn received_date(&self) -> &str {
        &self.received_date
    }

    pub fn set_received_date(&mut self, date: impl Into<String>) {
        self.received_date = date.into();
    }

    pub fn items(&self) -> &FieldArray {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut FieldArray {
        &mut self.items
    }

    /// 「商品を追加」
    pub fn add_item(&mut self) -> ItemId {
        self.items.append_blank()
    }

    /// 確認後に行を削除。キャンセル時は何も変えない。
    pub fn confirm_remove(&mut self, id: ItemId, confirm: &mut impl Confirm) -> bool {
        if self.items.get(id).is_none() {
            return false;
        }
        if !confirm.confirm(REMOVE_ROW_PROMPT) {
            return false;
        }
        self.items.remove(id).is_some()
    }

    /// セル上のキー入力を処理
    pub fn handle_key(&mut self, at: CellCoord, key: NavKey) -> KeyOutcome {
        match grid::navigate(&self.items, at, key) {
            KeyAction::Focus(coord) => KeyOutcome::Focus(coord),
            KeyAction::Absorb => KeyOutcome::Absorbed,
            KeyAction::AppendRow => {
                self.items.append_blank();
                KeyOutcome::FocusAfterSettle
            }
            KeyAction::RequestRemove { row } => match self.items.id_at(row) {
                Some(id) => KeyOutcome::ConfirmRemove(id),
                None => KeyOutcome::Ignored,
            },
            KeyAction::PassThrough => KeyOutcome::Ignored,
        }
    }

    /// 描画確定後のフォーカス先
    pub fn settle_focus(&mut self) -> Option<CellCoord> {
        self.items.settle_focus()
    }

    pub fn values(&self) -> OrderValues {
        OrderValues {
            company_id: self.company.selected_id().to_string(),
            received_date: self.received_date.clone(),
            items: self.items.values(),
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, path: &str) -> Option<&str> {
        self.errors.get(path)
    }

    /// 検証して送信。検証エラーは保持して返し、入力はそのまま残す。
    pub fn submit(
        &mut self,
        schema: &impl Schema,
        submitter: &mut impl Submitter,
    ) -> Result<SubmitOutcome> {
        let values = self.values();
        match schema.validate(&values) {
            Ok(()) => {
                submitter.submit(&values)?;
                self.errors = ValidationErrors::new();
                Ok(SubmitOutcome::Submitted(values))
            }
            Err(errors) => {
                self.errors = errors.clone();
                Ok(SubmitOutcome::Rejected(errors))
            }
        }
    }
}
