//! フィールド直下のエラー表示

use leptos::prelude::*;
use order_form_common::OrderForm;

#[component]
pub fn ErrorText(form: RwSignal<OrderForm>, path: String) -> impl IntoView {
    let message = move || form.with(|f| f.error_for(&path).map(str::to_string));

    view! {
        {move || message().map(|msg| view! { <p class="field-error">{msg}</p> })}
    }
}
