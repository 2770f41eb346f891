//! メインアプリケーションコンポーネント

use crate::components::{
    company_selector::CompanySelector, line_item::LineItemRow, error_text::ErrorText,
};
use crate::focus::focus_after_settle;
use crate::submit::ConsoleSubmitter;
use leptos::prelude::*;
use order_form_common::company::builtin_companies;
use order_form_common::validation::{self, OrderSchema};
use order_form_common::{OrderForm, SubmitOutcome};

/// 今日の日付（YYYY-MM-DD, UTC）
fn today() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    iso.chars().take(10).collect()
}

#[component]
pub fn App() -> impl IntoView {
    let form = RwSignal::new(OrderForm::new(builtin_companies(), today()));

    let on_add = move |_| {
        form.update(|f| {
            f.add_item();
        });
        focus_after_settle(form);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let outcome = form.try_update(|f| f.submit(&OrderSchema, &mut ConsoleSubmitter));
        match outcome {
            Some(Ok(SubmitOutcome::Submitted(_))) => {}
            Some(Ok(SubmitOutcome::Rejected(errors))) => {
                gloo::console::warn!(errors.to_string());
                for error in errors.iter() {
                    gloo::console::debug!(format!("  {}: {}", error.path, error.message));
                }
            }
            Some(Err(e)) => gloo::console::error!(format!("送信に失敗しました: {}", e)),
            None => {}
        }
    };

    view! {
        <form class="container order-form" on:submit=on_submit>
            <header class="header">
                <h1>"受注入力"</h1>
            </header>

            <section class="order-header">
                <div class="field">
                    <label>"会社"</label>
                    <CompanySelector form=form />
                    <ErrorText form=form path=validation::COMPANY_ID.to_string() />
                </div>

                <div class="field">
                    <label for="received-date">"受付日"</label>
                    <input
                        id="received-date"
                        type="date"
                        prop:value=move || form.with(|f| f.received_date().to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.set_received_date(value));
                        }
                    />
                    <ErrorText form=form path=validation::RECEIVED_DATE.to_string() />
                </div>
            </section>

            <section class="line-items">
                <h2>"商品"</h2>
                <For
                    each=move || form.with(|f| f.items().ids().to_vec())
                    key=|id| *id
                    children=move |id| view! { <LineItemRow form=form id=id /> }
                />
                <ErrorText form=form path=validation::ITEMS.to_string() />
                <button type="button" class="btn btn-secondary" on:click=on_add>
                    "＋ 商品を追加"
                </button>
            </section>

            <div class="actions">
                <button type="submit" class="btn btn-primary">"送信"</button>
            </div>
        </form>
    }
}
