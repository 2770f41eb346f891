//! 明細グリッドのキーボード移動
//!
//! 各入力セルは (行, 列) 座標を公開し、移動先はその座標で引く。
//! 列順は 商品名 → 単位 → 数量 で固定、行順は配列の並び順。

use std::fmt;

/// 入力セルの列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ProductName,
    Unit,
    Quantity,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::ProductName, Column::Unit, Column::Quantity];

    /// `data-col` 属性値・フィールドパスの末尾
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::ProductName => "productName",
            Column::Unit => "unit",
            Column::Quantity => "quantity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::ProductName => "商品名",
            Column::Unit => "単位",
            Column::Quantity => "数量",
        }
    }

    /// 右隣の列（折り返しなし）
    pub fn next(&self) -> Option<Column> {
        match self {
            Column::ProductName => Some(Column::Unit),
            Column::Unit => Some(Column::Quantity),
            Column::Quantity => None,
        }
    }

    /// 左隣の列（折り返しなし）
    pub fn prev(&self) -> Option<Column> {
        match self {
            Column::ProductName => None,
            Column::Unit => Some(Column::ProductName),
            Column::Quantity => Some(Column::Unit),
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|col| col.as_str() == s)
            .ok_or_else(|| format!("Unknown column: {}", s))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// セル座標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub column: Column,
}

impl CellCoord {
    pub fn new(row: usize, column: Column) -> Self {
        Self { row, column }
    }

    /// `[data-row="0"][data-col="unit"]` 形式のセレクタ
    pub fn selector(&self) -> String {
        format!(r#"[data-row="{}"][data-col="{}"]"#, self.row, self.column.as_str())
    }
}

/// グリッドで扱うキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Delete,
}

impl NavKey {
    /// `KeyboardEvent.key` の値から変換。対象外のキーは `None`。
    pub fn from_key_name(key: &str) -> Option<NavKey> {
        match key {
            "ArrowUp" => Some(NavKey::ArrowUp),
            "ArrowDown" => Some(NavKey::ArrowDown),
            "ArrowLeft" => Some(NavKey::ArrowLeft),
            "ArrowRight" => Some(NavKey::ArrowRight),
            "Enter" => Some(NavKey::Enter),
            "Delete" => Some(NavKey::Delete),
            _ => None,
        }
    }

    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            NavKey::ArrowUp | NavKey::ArrowDown | NavKey::ArrowLeft | NavKey::ArrowRight
        )
    }
}

/// 座標でセルを引ける入力面
pub trait CellSurface {
    fn has_cell(&self, coord: CellCoord) -> bool;
    fn row_count(&self) -> usize;
}

/// キー入力に対する動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// 指定セルへフォーカス（既定動作は抑止）
    Focus(CellCoord),
    /// 既定動作を抑止し、フォーカスは動かさない
    Absorb,
    /// 行を追加して新しい行の商品名へ
    AppendRow,
    /// 確認のうえ行を削除
    RequestRemove { row: usize },
    /// 何もしない（既定動作のまま）
    PassThrough,
}

fn arrow_target(at: CellCoord, key: NavKey) -> Option<CellCoord> {
    match key {
        NavKey::ArrowRight => at.column.next().map(|c| CellCoord::new(at.row, c)),
        NavKey::ArrowLeft => at.column.prev().map(|c| CellCoord::new(at.row, c)),
        NavKey::ArrowDown => Some(CellCoord::new(at.row + 1, at.column)),
        NavKey::ArrowUp => at.row.checked_sub(1).map(|r| CellCoord::new(r, at.column)),
        _ => None,
    }
}

fn focus_if_present<S: CellSurface + ?Sized>(surface: &S, target: Option<CellCoord>) -> KeyAction {
    match target {
        Some(coord) if surface.has_cell(coord) => KeyAction::Focus(coord),
        _ => KeyAction::Absorb,
    }
}

/// キー入力を移動動作に変換
pub fn navigate<S: CellSurface + ?Sized>(surface: &S, at: CellCoord, key: NavKey) -> KeyAction {
    if key.is_arrow() {
        return focus_if_present(surface, arrow_target(at, key));
    }

    match (key, at.column) {
        (NavKey::Enter, Column::ProductName) | (NavKey::Enter, Column::Unit) => {
            focus_if_present(surface, at.column.next().map(|c| CellCoord::new(at.row, c)))
        }
        (NavKey::Enter, Column::Quantity) => {
            // 途中の行では何もしない。フォームの暗黙送信は抑止する
            if at.row + 1 == surface.row_count() {
                KeyAction::AppendRow
            } else {
                KeyAction::Absorb
            }
        }
        (NavKey::Delete, Column::ProductName) => KeyAction::RequestRemove { row: at.row },
        _ => KeyAction::PassThrough,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 全行・全列にセルがある面
    struct FullGrid(usize);

    impl CellSurface for FullGrid {
        fn has_cell(&self, coord: CellCoord) -> bool {
            coord.row < self.0
        }

        fn row_count(&self) -> usize {
            self.0
        }
    }

    fn at(row: usize, column: Column) -> CellCoord {
        CellCoord::new(row, column)
    }

    #[test]
    fn test_arrow_right_steps_columns() {
        let grid = FullGrid(2);
        assert_eq!(
            navigate(&grid, at(0, Column::ProductName), NavKey::ArrowRight),
            KeyAction::Focus(at(0, Column::Unit))
        );
        assert_eq!(
            navigate(&grid, at(0, Column::Unit), NavKey::ArrowRight),
            KeyAction::Focus(at(0, Column::Quantity))
        );
    }

    #[test]
    fn test_arrow_right_from_quantity_is_absorbed() {
        let grid = FullGrid(2);
        assert_eq!(navigate(&grid, at(0, Column::Quantity), NavKey::ArrowRight), KeyAction::Absorb);
    }

    #[test]
    fn test_arrow_left_does_not_wrap() {
        let grid = FullGrid(2);
        assert_eq!(navigate(&grid, at(1, Column::ProductName), NavKey::ArrowLeft), KeyAction::Absorb);
        assert_eq!(
            navigate(&grid, at(1, Column::Quantity), NavKey::ArrowLeft),
            KeyAction::Focus(at(1, Column::Unit))
        );
    }

    #[test]
    fn test_vertical_moves_keep_column() {
        let grid = FullGrid(3);
        assert_eq!(
            navigate(&grid, at(1, Column::Unit), NavKey::ArrowDown),
            KeyAction::Focus(at(2, Column::Unit))
        );
        assert_eq!(
            navigate(&grid, at(1, Column::Unit), NavKey::ArrowUp),
            KeyAction::Focus(at(0, Column::Unit))
        );
        assert_eq!(navigate(&grid, at(0, Column::Unit), NavKey::ArrowUp), KeyAction::Absorb);
        assert_eq!(navigate(&grid, at(2, Column::Unit), NavKey::ArrowDown), KeyAction::Absorb);
    }

    #[test]
    fn test_enter_chains_within_row() {
        let grid = FullGrid(2);
        assert_eq!(
            navigate(&grid, at(0, Column::ProductName), NavKey::Enter),
            KeyAction::Focus(at(0, Column::Unit))
        );
        assert_eq!(
            navigate(&grid, at(0, Column::Unit), NavKey::Enter),
            KeyAction::Focus(at(0, Column::Quantity))
        );
    }

    #[test]
    fn test_enter_on_quantity_appends_only_on_last_row() {
        let grid = FullGrid(2);
        assert_eq!(navigate(&grid, at(1, Column::Quantity), NavKey::Enter), KeyAction::AppendRow);
        assert_eq!(navigate(&grid, at(0, Column::Quantity), NavKey::Enter), KeyAction::Absorb);
    }

    #[test]
    fn test_delete_only_from_product_name() {
        let grid = FullGrid(2);
        assert_eq!(
            navigate(&grid, at(1, Column::ProductName), NavKey::Delete),
            KeyAction::RequestRemove { row: 1 }
        );
        assert_eq!(navigate(&grid, at(1, Column::Unit), NavKey::Delete), KeyAction::PassThrough);
    }

    #[test]
    fn test_key_names_and_selector() {
        assert_eq!(NavKey::from_key_name("ArrowDown"), Some(NavKey::ArrowDown));
        assert_eq!(NavKey::from_key_name("Tab"), None);
        assert_eq!(at(3, Column::Quantity).selector(), r#"[data-row="3"][data-col="quantity"]"#);
        assert_eq!("unit".parse::<Column>(), Ok(Column::Unit));
    }
}
