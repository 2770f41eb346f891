//! 注文JSONファイルのテスト
//!
//! 送信時に書き出したJSONを読み戻して検証できることを確認

use order_form::submit::PrintSubmitter;
use order_form_common::company::builtin_companies;
use order_form_common::{ImageAsset, OrderForm, OrderSchema, OrderValues, Schema, SubmitOutcome};
use tempfile::tempdir;

fn filled_form() -> OrderForm {
    let mut form = OrderForm::new(builtin_companies(), "2026-10-18");
    form.select_company("cty01");
    let id = form.items().id_at(0).unwrap();
    let items = form.items_mut();
    items.set_product_name(id, "六角ボルト");
    items.set_unit(id, "本");
    items.set_quantity(id, 12);
    items.attach_image(id, ImageAsset::new("data:image/png;base64,iVBORw0K"));
    form
}

/// 送信成功時にJSONを書き出し、読み戻すと検証を通る
#[test]
fn test_submit_writes_order_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("order.json");

    let mut form = filled_form();
    let mut submitter = PrintSubmitter::new(Some(output.clone()), false);
    let outcome = form.submit(&OrderSchema, &mut submitter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
    assert_eq!(submitter.submitted(), 1);

    let content = std::fs::read_to_string(&output).unwrap();
    let order: OrderValues = serde_json::from_str(&content).unwrap();
    assert_eq!(order.company_id, "cty01");
    assert_eq!(order.items[0].product_name, "六角ボルト");
    assert_eq!(order.items[0].images.len(), 1);
    assert!(OrderSchema.validate(&order).is_ok());
}

/// 検証エラー時は書き出さない
#[test]
fn test_rejected_submit_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("order.json");

    let mut form = filled_form();
    let id = form.items().id_at(0).unwrap();
    form.items_mut().set_quantity(id, 0);

    let mut submitter = PrintSubmitter::new(Some(output.clone()), false);
    let outcome = form.submit(&OrderSchema, &mut submitter).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(submitter.submitted(), 0);
    assert!(!output.exists());
    assert!(form.error_for("items.0.quantity").is_some());
}

/// 書き出したJSONからフォームを再開
#[test]
fn test_resume_from_saved_values() {
    let values = filled_form().values();
    let json = serde_json::to_string(&values).unwrap();
    let restored: OrderValues = serde_json::from_str(&json).unwrap();

    let form = OrderForm::from_values(builtin_companies(), restored);
    assert_eq!(form.company().label(), "A商事");
    assert_eq!(form.items().at(0).unwrap().quantity, 12);
}
