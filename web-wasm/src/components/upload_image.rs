//! 明細の画像添付（ファイル選択・貼り付け・サムネイル・全画面表示）

use crate::reader::{files_from_clipboard, files_from_list, ingest_files};
use leptos::html;
use leptos::prelude::*;
use order_form_common::{ItemId, ModalClick, OrderForm, ScrollDirection};
use web_sys::{ClipboardEvent, HtmlInputElement, MouseEvent, ScrollBehavior, ScrollToOptions};

#[component]
pub fn ImageUploader(form: RwSignal<OrderForm>, id: ItemId) -> impl IntoView {
    let (paste_focused, set_paste_focused) = signal(false);
    let strip = NodeRef::<html::Div>::new();

    let images = move || {
        form.with(|f| {
            f.items()
                .get(id)
                .map(|item| item.images.images().to_vec())
                .unwrap_or_default()
        })
    };
    let pending = move || form.with(|f| f.items().get(id).map(|item| item.images.pending_decodes()).unwrap_or(0));
    let shows_controls = move || form.with(|f| f.items().get(id).is_some_and(|item| item.images.shows_scroll_controls()));
    let fullscreen = move || form.with(|f| f.items().get(id).and_then(|item| item.images.fullscreen().cloned()));

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            ingest_files(form, id, files_from_list(&list));
        }
        input.set_value("");
    };

    let on_paste = move |ev: ClipboardEvent| {
        let Some(data) = ev.clipboard_data() else {
            return;
        };
        let files = files_from_clipboard(&data.items());
        if !files.is_empty() {
            ev.prevent_default();
            ingest_files(form, id, files);
        }
    };

    let scroll = move |direction: ScrollDirection| {
        let delta = form.with_untracked(|f| f.items().get(id).map(|item| item.images.scroll(direction)));
        let (Some(delta), Some(el)) = (delta, strip.get()) else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_left(f64::from(delta));
        options.set_behavior(ScrollBehavior::Smooth);
        el.scroll_by_with_scroll_to_options(&options);
    };

    let click_modal = move |target: ModalClick| {
        form.update(|f| {
            if let Some(item) = f.items_mut().get_mut(id) {
                item.images.click_fullscreen(target);
            }
        });
    };

    view! {
        <div class="image-uploader">
            <div class="upload-row">
                <label class="btn btn-secondary file-button">
                    "📷 画像を選択"
                    <input type="file" accept="image/*" multiple=true class="hidden" on:change=on_change />
                </label>
                <div
                    class="paste-zone"
                    class:focused=paste_focused
                    tabindex="0"
                    on:focus=move |_| set_paste_focused.set(true)
                    on:blur=move |_| set_paste_focused.set(false)
                    on:paste=on_paste
                >
                    {move || {
                        if paste_focused.get() {
                            "Ctrl+V で画像を貼り付け"
                        } else {
                            "ここをクリックして画像を貼り付け"
                        }
                    }}
                </div>
                <Show when=move || { pending() > 0 }>
                    <span class="text-muted">{move || format!("読み込み中 {}", pending())}</span>
                </Show>
            </div>

            <div class="thumbnail-strip-wrapper">
                <Show when=shows_controls>
                    <button
                        type="button"
                        class="scroll-btn scroll-left"
                        on:click=move |_| scroll(ScrollDirection::Left)
                    >
                        "‹"
                    </button>
                </Show>

                <div class="thumbnail-strip" node_ref=strip>
                    {move || {
                        images()
                            .into_iter()
                            .enumerate()
                            .map(|(index, asset)| {
                                view! {
                                    <div class="thumbnail">
                                        <img
                                            src=asset.as_str().to_string()
                                            alt=format!("画像{}", index + 1)
                                            on:click=move |_| {
                                                form.update(|f| {
                                                    if let Some(item) = f.items_mut().get_mut(id) {
                                                        item.images.open_fullscreen(index);
                                                    }
                                                });
                                            }
                                        />
                                        <button
                                            type="button"
                                            class="thumbnail-remove"
                                            on:click=move |_| {
                                                form.update(|f| {
                                                    if let Some(item) = f.items_mut().get_mut(id) {
                                                        item.images.remove(index);
                                                    }
                                                });
                                            }
                                        >
                                            "✕"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                <Show when=shows_controls>
                    <button
                        type="button"
                        class="scroll-btn scroll-right"
                        on:click=move |_| scroll(ScrollDirection::Right)
                    >
                        "›"
                    </button>
                </Show>
            </div>

            {move || {
                fullscreen()
                    .map(|asset| {
                        view! {
                            <div class="modal-backdrop" on:click=move |_| click_modal(ModalClick::Backdrop)>
                                <div class="modal-body">
                                    <button
                                        type="button"
                                        class="modal-close"
                                        on:click=move |ev: MouseEvent| {
                                            ev.stop_propagation();
                                            click_modal(ModalClick::CloseButton);
                                        }
                                    >
                                        "✕"
                                    </button>
                                    <img
                                        class="modal-image"
                                        src=asset.as_str().to_string()
                                        alt=""
                                        on:click=move |ev: MouseEvent| {
                                            ev.stop_propagation();
                                            click_modal(ModalClick::Image);
                                        }
                                    />
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
