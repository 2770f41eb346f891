//! 端末向けの明細表示

use order_form_common::validation::{self, item_path};
use order_form_common::{Column, LineItem, OrderForm, ViewState};

/// 1行分の表示（折りたたみ中はスナップショットを表示）
pub fn format_row(index: usize, item: &LineItem) -> String {
    match item.view() {
        ViewState::Collapsed(snapshot) => format!(
            "[{}] ✔ {} | {} | {} | {}",
            index + 1,
            snapshot.product_name,
            snapshot.quantity_line(),
            snapshot.status_label(),
            if snapshot.thumbnail.is_some() { "🖼" } else { "-" },
        ),
        ViewState::Editing => {
            let name = if item.product_name.is_empty() { "(未入力)" } else { item.product_name.as_str() };
            let pending = item.images.pending_decodes();
            let mut line = format!(
                "[{}] ✎ {} | {} {} | {} | 画像{}枚",
                index + 1,
                name,
                item.quantity,
                item.unit,
                item.status.label(),
                item.images.len(),
            );
            if pending > 0 {
                line.push_str(&format!(" (読み込み中 {})", pending));
            }
            line
        }
    }
}

/// 行選択用の短いラベル
pub fn row_label(index: usize, item: &LineItem) -> String {
    let name = if item.product_name.is_empty() { "(未入力)" } else { item.product_name.as_str() };
    format!("{}. {}", index + 1, name)
}

/// フォーム全体を表示（検証エラーは該当フィールドの直後に出す）
pub fn print_form(form: &OrderForm) {
    println!("\n会社: {}", form.company().label());
    if let Some(msg) = form.error_for(validation::COMPANY_ID) {
        println!("  ⚠ {}", msg);
    }
    println!("受付日: {}", form.received_date());
    if let Some(msg) = form.error_for(validation::RECEIVED_DATE) {
        println!("  ⚠ {}", msg);
    }

    println!("---");
    if form.items().is_empty() {
        println!("  (商品なし)");
    }
    for (index, item) in form.items().iter().enumerate() {
        println!("  {}", format_row(index, item));
        for column in Column::ALL {
            if let Some(msg) = form.error_for(&item_path(index, column)) {
                println!("      ⚠ {}: {}", column.label(), msg);
            }
        }
    }
    if let Some(msg) = form.error_for(validation::ITEMS) {
        println!("  ⚠ {}", msg);
    }
    println!("---");
}
