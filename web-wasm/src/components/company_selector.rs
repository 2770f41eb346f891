//! 会社選択（検索付きポップオーバー）

use leptos::prelude::*;
use order_form_common::company::COMPANY_NOT_FOUND;
use order_form_common::{Company, OrderForm};

#[component]
pub fn CompanySelector(form: RwSignal<OrderForm>) -> impl IntoView {
    let is_open = move || form.with(|f| f.company().is_open());
    let label = move || form.with(|f| f.company().label().to_string());
    let filtered = move || {
        form.with(|f| {
            f.company()
                .filtered()
                .into_iter()
                .cloned()
                .collect::<Vec<Company>>()
        })
    };

    let on_toggle = move |_| {
        form.update(|f| {
            let open = f.company().is_open();
            f.company_mut().set_open(!open);
        });
    };

    view! {
        <div class="company-selector">
            <button
                type="button"
                class="combobox"
                class:placeholder=move || form.with(|f| f.company().selected_company().is_none())
                aria-expanded=move || is_open().to_string()
                on:click=on_toggle
            >
                {label}
                <span class="chevron">"▾"</span>
            </button>

            <Show when=is_open>
                <div class="popover">
                    <input
                        type="text"
                        class="company-search"
                        placeholder="会社名で検索..."
                        prop:value=move || form.with(|f| f.company().query().to_string())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            form.update(|f| f.company_mut().set_query(query));
                        }
                    />
                    <Show
                        when=move || !filtered().is_empty()
                        fallback=|| view! { <p class="text-muted">{COMPANY_NOT_FOUND}</p> }
                    >
                        <ul class="company-list">
                            <For
                                each=filtered
                                key=|company| company.id.clone()
                                children=move |company| {
                                    let id = company.id.clone();
                                    let check_id = company.id.clone();
                                    view! {
                                        <li
                                            class="company-option"
                                            on:click=move |_| {
                                                form.update(|f| {
                                                    f.select_company(&id);
                                                });
                                            }
                                        >
                                            <span class="check">
                                                {move || {
                                                    if form.with(|f| f.company().is_selected(&check_id)) {
                                                        "✓"
                                                    } else {
                                                        ""
                                                    }
                                                }}
                                            </span>
                                            {company.name.clone()}
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
