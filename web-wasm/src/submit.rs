//! 送信処理（サーバ送信なし: コンソール出力のみ）

use order_form_common::{OrderValues, Submitter};

#[derive(Default)]
pub struct ConsoleSubmitter;

impl Submitter for ConsoleSubmitter {
    fn submit(&mut self, order: &OrderValues) -> order_form_common::Result<()> {
        match serde_wasm_bindgen::to_value(order) {
            Ok(value) => gloo::console::log!("注文データ:", value),
            Err(e) => gloo::console::warn!(format!("注文データを出力できません: {}", e)),
        }
        Ok(())
    }
}
