//! 描画確定後のフォーカス移動

use leptos::prelude::*;
use order_form_common::{CellCoord, OrderForm};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// セルへ即時フォーカス。該当要素が無ければ false
pub fn focus_cell(coord: CellCoord) -> bool {
    let Some(element) = document()
        .query_selector(&coord.selector())
        .ok()
        .flatten()
    else {
        return false;
    };

    match element.dyn_into::<HtmlElement>() {
        Ok(el) => el.focus().is_ok(),
        Err(_) => false,
    }
}

/// 次フレームで予約中のフォーカスを確定させる
///
/// 同一フレーム内の予約は後勝ち。2回目以降のコールバックは何もしない。
pub fn focus_after_settle(form: RwSignal<OrderForm>) {
    request_animation_frame(move || {
        let settled = form.try_update_untracked(|f| f.settle_focus()).flatten();
        if let Some(coord) = settled {
            if !focus_cell(coord) {
                gloo::console::warn!(format!("フォーカス先が見つかりません: {}", coord.selector()));
            }
        }
    });
}
