//! 商品明細の1行（編集セル / 折りたたみ表示）

use crate::components::upload_image::ImageUploader;
use crate::focus::{focus_after_settle, focus_cell};
use leptos::prelude::*;
use order_form_common::validation::item_path;
use order_form_common::{CellCoord, Column, ItemId, KeyOutcome, NavKey, OrderForm, OrderStatus};
use web_sys::KeyboardEvent;

/// 確認ダイアログを出してから行を削除
pub fn remove_with_confirm(form: RwSignal<OrderForm>, id: ItemId) {
    let mut confirm = |message: &str| window().confirm_with_message(message).unwrap_or(false);
    let removed = form
        .try_update(|f| f.confirm_remove(id, &mut confirm))
        .unwrap_or(false);
    if removed {
        focus_after_settle(form);
    }
}

#[component]
pub fn LineItemRow(form: RwSignal<OrderForm>, id: ItemId) -> impl IntoView {
    let collapsed = move || form.with(|f| f.items().get(id).is_some_and(|item| item.is_collapsed()));
    let view_state = move || {
        form.with(|f| f.items().get(id).map(|item| item.view().as_str()).unwrap_or_default())
    };
    let number = move || form.with(|f| f.items().position_of(id).map(|i| i + 1).unwrap_or_default());

    view! {
        <div class="line-item" class:collapsed=collapsed data-item=id.to_string() data-view=view_state>
            <div class="line-item-header">
                <span class="row-number">{number}</span>
                <button
                    type="button"
                    class="btn-remove"
                    title="削除"
                    on:click=move |_| remove_with_confirm(form, id)
                >
                    "✕"
                </button>
            </div>
            <Show when=collapsed fallback=move || view! { <ItemEditor form=form id=id /> }>
                <ItemSummary form=form id=id />
            </Show>
        </div>
    }
}

#[component]
fn ItemEditor(form: RwSignal<OrderForm>, id: ItemId) -> impl IntoView {
    let initial_status = form.with_untracked(|f| f.items().get(id).map(|item| item.status).unwrap_or_default());

    let on_status = move |ev| {
        if let Ok(status) = event_target_value(&ev).parse::<OrderStatus>() {
            form.update(|f| {
                f.items_mut().set_status(id, status);
            });
        }
    };

    let on_finish = move |_| {
        form.update(|f| {
            f.items_mut().update(id, |item| {
                item.finish_editing();
            });
        });
    };

    view! {
        <div class="item-editor">
            <div class="item-cells">
                <GridCell form=form id=id column=Column::ProductName />
                <GridCell form=form id=id column=Column::Unit />
                <GridCell form=form id=id column=Column::Quantity />
                <div class="field">
                    <label>"状態"</label>
                    <select on:change=on_status>
                        {OrderStatus::ALL
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <option value=status.as_str() selected={status == initial_status}>
                                        {status.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <ImageUploader form=form id=id />

            <div class="item-actions">
                <button type="button" class="btn btn-secondary" on:click=on_finish>
                    "完了"
                </button>
            </div>
        </div>
    }
}

/// 入力セル。`data-row`/`data-col` でフォーカス先を特定する
#[component]
fn GridCell(form: RwSignal<OrderForm>, id: ItemId, column: Column) -> impl IntoView {
    // 入力中の値は要素側が持つ。状態へは on:input で反映する
    let initial = form.with_untracked(|f| {
        f.items()
            .get(id)
            .map(|item| match column {
                Column::ProductName => item.product_name.clone(),
                Column::Unit => item.unit.clone(),
                Column::Quantity => item.quantity.to_string(),
            })
            .unwrap_or_default()
    });

    let row = move || {
        form.with(|f| f.items().position_of(id).map(|r| r.to_string()).unwrap_or_default())
    };
    let error = move || {
        form.with(|f| {
            f.items()
                .position_of(id)
                .and_then(|r| f.error_for(&item_path(r, column)).map(str::to_string))
        })
    };

    let on_input = move |ev| {
        let raw = event_target_value(&ev);
        form.update(|f| {
            let items = f.items_mut();
            match column {
                Column::ProductName => items.set_product_name(id, raw),
                Column::Unit => items.set_unit(id, raw),
                Column::Quantity => items.set_quantity(id, raw.trim().parse().unwrap_or(0)),
            };
        });
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let Some(key) = NavKey::from_key_name(&ev.key()) else {
            return;
        };
        let Some(row) = form.with_untracked(|f| f.items().position_of(id)) else {
            return;
        };

        let at = CellCoord::new(row, column);
        let Some(outcome) = form.try_update_untracked(|f| f.handle_key(at, key)) else {
            return;
        };
        if outcome.prevents_default() {
            ev.prevent_default();
        }

        match outcome {
            KeyOutcome::Ignored | KeyOutcome::Absorbed => {}
            KeyOutcome::Focus(coord) => {
                focus_cell(coord);
            }
            KeyOutcome::FocusAfterSettle => {
                form.notify();
                focus_after_settle(form);
            }
            KeyOutcome::ConfirmRemove(target) => remove_with_confirm(form, target),
        }
    };

    let input_type = if column == Column::Quantity { "number" } else { "text" };

    view! {
        <div class="field">
            <label>{column.label()}</label>
            <input
                type=input_type
                min={if column == Column::Quantity { Some("1") } else { None }}
                data-row=row
                data-col=column.as_str()
                prop:value=initial
                on:input=on_input
                on:keydown=on_keydown
            />
            {move || error().map(|msg| view! { <p class="field-error">{msg}</p> })}
        </div>
    }
}

#[component]
fn ItemSummary(form: RwSignal<OrderForm>, id: ItemId) -> impl IntoView {
    let snapshot = move || {
        form.with(|f| f.items().get(id).and_then(|item| item.view().snapshot().cloned()))
    };

    let on_edit = move |_| {
        form.update(|f| {
            f.items_mut().update(id, |item| item.resume_editing());
        });
    };

    view! {
        <div class="item-summary">
            {move || {
                snapshot()
                    .map(|s| {
                        let quantity = s.quantity_line();
                        let status = s.status_label();
                        let thumbnail = s.thumbnail.map(|asset| {
                            view! { <img class="summary-thumb" src=asset.as_str().to_string() alt="" /> }
                        });
                        view! {
                            {thumbnail}
                            <div class="summary-text">
                                <strong>{s.product_name}</strong>
                                <span class="summary-quantity">{quantity}</span>
                                <span class="status-badge">{status}</span>
                            </div>
                        }
                    })
            }}
            <button type="button" class="btn btn-secondary" on:click=on_edit>
                "編集"
            </button>
        </div>
    }
}
