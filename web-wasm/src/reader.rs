//! FileReader による画像デコード

use leptos::prelude::*;
use order_form_common::images::{select_clipboard, select_files};
use order_form_common::{ImageAsset, ItemId, MediaSource, OrderForm};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{DataTransferItem, DataTransferItemList, File, FileList, FileReader};

/// ファイル選択の1件
pub struct PickedFile(pub File);

impl MediaSource for PickedFile {
    fn media_type(&self) -> String {
        self.0.type_()
    }
}

/// クリップボードの1件
pub struct ClipboardEntry(pub DataTransferItem);

impl MediaSource for ClipboardEntry {
    fn media_type(&self) -> String {
        self.0.type_()
    }
}

pub fn files_from_list(list: &FileList) -> Vec<File> {
    let picked = (0..list.length()).filter_map(|i| list.get(i)).map(PickedFile);
    select_files(picked).into_iter().map(|p| p.0).collect()
}

pub fn files_from_clipboard(items: &DataTransferItemList) -> Vec<File> {
    let entries = (0..items.length()).filter_map(|i| items.get(i)).map(ClipboardEntry);
    select_clipboard(entries)
        .into_iter()
        .filter_map(|entry| entry.0.get_as_file().ok().flatten())
        .collect()
}

/// 各ファイルを並行デコードし、読み終わった順に行へ追加する
pub fn ingest_files(form: RwSignal<OrderForm>, id: ItemId, files: Vec<File>) {
    for file in files {
        let Some(ticket) = form.try_update(|f| f.items_mut().begin_decode(id)).flatten() else {
            return;
        };

        let name = file.name();
        read_as_data_url(file, move |decoded| {
            if decoded.is_none() {
                gloo::console::warn!(format!("画像を読み込めませんでした: {}", name));
            }
            let appended = form
                .try_update(|f| f.items_mut().complete_decode(id, ticket, decoded))
                .unwrap_or(false);
            if !appended {
                gloo::console::debug!(format!("画像を追加しませんでした: {}", name));
            }
        });
    }
}

type Done = Rc<RefCell<Option<Box<dyn FnOnce(Option<ImageAsset>)>>>>;

/// `on_done` は成功・失敗を問わず1回だけ呼ばれる
fn read_as_data_url(file: File, on_done: impl FnOnce(Option<ImageAsset>) + 'static) {
    let done: Done = Rc::new(RefCell::new(Some(Box::new(on_done))));

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(_) => {
            finish(&done, None);
            return;
        }
    };

    let reader_clone = reader.clone();
    let done_load = done.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let decoded = reader_clone
            .result()
            .ok()
            .and_then(|result| result.as_string())
            .and_then(|data_url| ImageAsset::from_data_url(data_url).ok());
        finish(&done_load, decoded);
    }) as Box<dyn FnMut(_)>);

    let done_error = done.clone();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        finish(&done_error, None);
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if reader.read_as_data_url(&file).is_err() {
        finish(&done, None);
    }
}

fn finish(done: &Done, decoded: Option<ImageAsset>) {
    let callback = done.borrow_mut().take();
    if let Some(callback) = callback {
        callback(decoded);
    }
}
