//! 対話式の注文入力
//!
//! 会社選択 → 受付日 → 明細入力 の順に進み、以降はメニューから
//! 行の追加・編集・完了（折りたたみ）・画像添付・削除・送信を行う。
//! 数量入力の後で続けて入力する場合は、グリッドのEnter連鎖と同じく最終行なら行を追加する。

use crate::config::Config;
use crate::error::{OrderFormError, Result};
use crate::ingest::{collect_sources, ingest_into};
use crate::render::{format_row, print_form, row_label};
use crate::submit::PrintSubmitter;
use dialoguer::{Confirm, Input, Select};
use order_form_common::company::COMPANY_NOT_FOUND;
use order_form_common::validation::item_path;
use order_form_common::{
    CellCoord, Column, Company, ItemId, KeyOutcome, NavKey, OrderForm, OrderSchema, OrderStatus,
    SubmitOutcome,
};
use std::path::{Path, PathBuf};

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    AddRow,
    EditRow,
    FinishRow,
    AttachImages,
    RemoveImage,
    RemoveRow,
    ChangeCompany,
    ChangeDate,
    Submit,
    Quit,
}

impl SessionAction {
    pub const ALL: [SessionAction; 10] = [
        SessionAction::AddRow,
        SessionAction::EditRow,
        SessionAction::FinishRow,
        SessionAction::AttachImages,
        SessionAction::RemoveImage,
        SessionAction::RemoveRow,
        SessionAction::ChangeCompany,
        SessionAction::ChangeDate,
        SessionAction::Submit,
        SessionAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::AddRow => "+ 商品を追加",
            SessionAction::EditRow => "商品を編集",
            SessionAction::FinishRow => "編集完了（折りたたむ）",
            SessionAction::AttachImages => "画像を添付",
            SessionAction::RemoveImage => "画像を削除",
            SessionAction::RemoveRow => "商品を削除",
            SessionAction::ChangeCompany => "会社を変更",
            SessionAction::ChangeDate => "受付日を変更",
            SessionAction::Submit => "注文を送信",
            SessionAction::Quit => "終了",
        }
    }
}

/// 今日の日付（受付日の初期値）
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// 画像パス入力を分解（カンマ区切り、前後の引用符は除く）
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn confirm(message: &str) -> bool {
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// 対話式で注文を入力
pub async fn run_interactive_order(
    companies: Vec<Company>,
    config: &Config,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut form = OrderForm::new(companies, today());

    choose_company(&mut form)?;
    change_date(&mut form)?;

    if let Some(first) = form.items().id_at(0) {
        edit_row(&mut form, first)?;
    }

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| config.default_output.clone());
    let mut submitter = PrintSubmitter::new(output, verbose);

    loop {
        print_form(&form);

        let labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()?;

        match SessionAction::ALL[choice] {
            SessionAction::AddRow => {
                form.add_item();
                focus_settled_row(&mut form)?;
            }
            SessionAction::EditRow => {
                if let Some(id) = pick_row(&form, "編集する商品")? {
                    if let Some(item) = form.items_mut().get_mut(id) {
                        item.resume_editing();
                    }
                    edit_row(&mut form, id)?;
                }
            }
            SessionAction::FinishRow => {
                if let Some(id) = pick_row(&form, "完了にする商品")? {
                    if let Some(item) = form.items_mut().get_mut(id) {
                        item.finish_editing();
                    }
                }
            }
            SessionAction::AttachImages => {
                if let Some(id) = pick_row(&form, "画像を添付する商品")? {
                    attach_images(&mut form, id, config.max_image_size, verbose).await?;
                }
            }
            SessionAction::RemoveImage => {
                if let Some(id) = pick_row(&form, "画像を削除する商品")? {
                    remove_image(&mut form, id)?;
                }
            }
            SessionAction::RemoveRow => {
                if let Some(id) = pick_row(&form, "削除する商品")? {
                    if form.confirm_remove(id, &mut confirm) {
                        println!("✔ 削除しました");
                        if let Some(coord) = form.settle_focus() {
                            if verbose {
                                println!("  → {}行目", coord.row + 1);
                            }
                        }
                    }
                }
            }
            SessionAction::ChangeCompany => choose_company(&mut form)?,
            SessionAction::ChangeDate => change_date(&mut form)?,
            SessionAction::Submit => match form.submit(&OrderSchema, &mut submitter)? {
                SubmitOutcome::Submitted(_) => {
                    println!("\n✅ 送信完了");
                    return Ok(());
                }
                SubmitOutcome::Rejected(errors) => {
                    println!("❌ 入力エラーが{}件あります", errors.len());
                    if verbose {
                        for error in errors.iter() {
                            eprintln!("  {}: {}", error.path, error.message);
                        }
                    }
                }
            },
            SessionAction::Quit => {
                if confirm("入力内容を破棄して終了しますか？") {
                    println!("終了します");
                    return Ok(());
                }
            }
        }
    }
}

/// 会社を検索して選択
fn choose_company(form: &mut OrderForm) -> Result<()> {
    loop {
        let query: String = Input::new()
            .with_prompt("会社を検索（空欄で全件）")
            .allow_empty(true)
            .interact_text()?;

        let selector = form.company_mut();
        selector.set_open(true);
        selector.set_query(query);
        let hits: Vec<Company> = selector.filtered().into_iter().cloned().collect();

        if hits.is_empty() {
            println!("  {}", COMPANY_NOT_FOUND);
            continue;
        }

        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        let default = hits
            .iter()
            .position(|c| selector.is_selected(&c.id))
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("会社")
            .items(&names)
            .default(default)
            .interact()?;

        form.select_company(&hits[choice].id);
        println!("  → {}", form.company().label());
        return Ok(());
    }
}

fn change_date(form: &mut OrderForm) -> Result<()> {
    let date: String = Input::new()
        .with_prompt("受付日 (YYYY-MM-DD)")
        .with_initial_text(form.received_date())
        .allow_empty(true)
        .interact_text()?;
    form.set_received_date(date.trim());
    Ok(())
}

fn pick_row(form: &OrderForm, prompt: &str) -> Result<Option<ItemId>> {
    let items = form.items();
    if items.is_empty() {
        println!("  商品がありません");
        return Ok(None);
    }
    let labels: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| format_row(i, item))
        .collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(items.len() - 1)
        .interact_opt()?;
    Ok(choice.and_then(|i| items.id_at(i)))
}

/// 構造変更後のフォーカス先の行を編集する
fn focus_settled_row(form: &mut OrderForm) -> Result<()> {
    let Some(coord) = form.settle_focus() else {
        return Ok(());
    };
    match form.items().id_at(coord.row) {
        Some(id) => edit_row(form, id),
        None => Ok(()),
    }
}

/// 1行分を 商品名 → 単位 → 数量 → 状況 の順に入力
fn edit_row(form: &mut OrderForm, id: ItemId) -> Result<()> {
    let Some(index) = form.items().position_of(id) else {
        return Ok(());
    };
    let Some(item) = form.items().get(id).cloned() else {
        return Ok(());
    };
    println!("\n{} を入力", row_label(index, &item));
    show_field_error(form, index, Column::ProductName);

    let product_name: String = Input::new()
        .with_prompt(Column::ProductName.label())
        .with_initial_text(item.product_name.as_str())
        .allow_empty(true)
        .interact_text()?;
    show_field_error(form, index, Column::Unit);
    let unit: String = Input::new()
        .with_prompt(Column::Unit.label())
        .with_initial_text(item.unit.as_str())
        .allow_empty(true)
        .interact_text()?;
    show_field_error(form, index, Column::Quantity);
    let quantity: i64 = Input::new()
        .with_prompt(Column::Quantity.label())
        .with_initial_text(item.quantity.to_string())
        .interact_text()?;

    let labels: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.label()).collect();
    let current = OrderStatus::ALL
        .iter()
        .position(|s| *s == item.status)
        .unwrap_or(0);
    let status = Select::new()
        .with_prompt("状況")
        .items(&labels)
        .default(current)
        .interact()?;

    let items = form.items_mut();
    items.set_product_name(id, product_name.trim());
    items.set_unit(id, unit.trim());
    items.set_quantity(id, quantity);
    items.set_status(id, OrderStatus::ALL[status]);

    // 数量の後のEnter相当: 最終行なら行を追加して続ける
    let Some(index) = form.items().position_of(id) else {
        return Ok(());
    };
    let is_last = index + 1 == form.items().len();
    if is_last && confirm("続けて次の商品を入力しますか？") {
        let outcome = form.handle_key(CellCoord::new(index, Column::Quantity), NavKey::Enter);
        if outcome == KeyOutcome::FocusAfterSettle {
            return focus_settled_row(form);
        }
    }
    Ok(())
}

fn show_field_error(form: &OrderForm, index: usize, column: Column) {
    if let Some(msg) = form.error_for(&item_path(index, column)) {
        println!("  ⚠ {}", msg);
    }
}

async fn attach_images(form: &mut OrderForm, id: ItemId, max_size: u32, verbose: bool) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("画像ファイル/フォルダ（カンマ区切り）")
        .allow_empty(true)
        .interact_text()?;
    let paths = parse_path_list(&input);
    if paths.is_empty() {
        return Ok(());
    }

    let sources = match collect_sources(&paths) {
        Ok(sources) => sources,
        Err(OrderFormError::FileNotFound(path)) => {
            println!("  ファイルが見つかりません: {}", path);
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    if sources.is_empty() {
        println!("  画像ファイルがありません");
        return Ok(());
    }

    if verbose {
        println!("  {}件をデコード中...", sources.len());
    }
    let report = ingest_into(form.items_mut(), id, sources, max_size, verbose).await;
    println!("✔ 画像{}枚を追加", report.added);
    if report.failed > 0 {
        println!("  {}件は読み込めませんでした", report.failed);
    }
    Ok(())
}

fn remove_image(form: &mut OrderForm, id: ItemId) -> Result<()> {
    let Some(item) = form.items().get(id) else {
        return Ok(());
    };
    if item.images.is_empty() {
        println!("  画像がありません");
        return Ok(());
    }

    let labels: Vec<String> = item
        .images
        .images()
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let kb = asset.base64_data().map(|d| d.len() * 3 / 4 / 1024).unwrap_or(0);
            format!("画像{} ({}, {}KB)", i + 1, asset.mime_type().unwrap_or("?"), kb)
        })
        .collect();
    let choice = Select::new()
        .with_prompt("削除する画像")
        .items(&labels)
        .interact_opt()?;

    if let Some(index) = choice {
        form.items_mut().update(id, |item| {
            item.images.remove(index);
        });
        println!("✔ 画像{}を削除しました", index + 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_list() {
        let paths = parse_path_list(r#" a.png, "b c.jpg" ,, 'dir' "#);
        assert_eq!(
            paths,
            vec![PathBuf::from("a.png"), PathBuf::from("b c.jpg"), PathBuf::from("dir")]
        );
        assert!(parse_path_list("  ").is_empty());
    }

    #[test]
    fn test_today_format() {
        let date = today();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_action_labels_unique() {
        let mut labels: Vec<&str> = SessionAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), SessionAction::ALL.len());
    }
}
