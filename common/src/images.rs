//! 明細ごとの添付画像ストア
//!
//! 取り込み元は2系統（ファイル選択・クリップボード貼り付け）。
//! デコードは非同期で、完了した順に末尾へ追加する。追加順は
//! 「選択した順」ではなく「デコードが終わった順」になる。

use crate::types::ImageAsset;
use std::collections::HashSet;

/// スクロールボタン1回分の移動量(px)
pub const SCROLL_STEP_PX: i32 = 150;

/// この枚数を超えたらスクロールボタンを表示
pub const SCROLL_CONTROLS_THRESHOLD: usize = 6;

/// 取り込み候補（ファイル・クリップボード項目）のMIMEタイプ取得
pub trait MediaSource {
    fn media_type(&self) -> String;
}

/// ファイル選択: `image/` で始まるものだけ
pub fn is_image_file(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// クリップボード: タイプに `image` を含むものだけ
pub fn is_clipboard_image(kind: &str) -> bool {
    kind.contains("image")
}

/// ファイル選択から画像のみを抽出（それ以外は黙って捨てる）
pub fn select_files<T: MediaSource>(entries: impl IntoIterator<Item = T>) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| is_image_file(&entry.media_type()))
        .collect()
}

/// クリップボード項目から画像のみを抽出
pub fn select_clipboard<T: MediaSource>(entries: impl IntoIterator<Item = T>) -> Vec<T> {
    entries
        .into_iter()
        .filter(|entry| is_clipboard_image(&entry.media_type()))
        .collect()
}

/// 進行中のデコード1件を表す札
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeTicket(u64);

/// スクロール方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// 全画面表示中のクリック位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    /// 背景（閉じる）
    Backdrop,
    /// 閉じるボタン（閉じる）
    CloseButton,
    /// 拡大画像そのもの（閉じない）
    Image,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageStore {
    images: Vec<ImageAsset>,
    pending: HashSet<DecodeTicket>,
    next_ticket: u64,
    fullscreen: Option<ImageAsset>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_images(images: Vec<ImageAsset>) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    pub fn first(&self) -> Option<&ImageAsset> {
        self.images.first()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// 末尾に追加
    pub(crate) fn push(&mut self, asset: ImageAsset) {
        self.images.push(asset);
    }

    /// デコード開始を登録
    pub fn begin_decode(&mut self) -> DecodeTicket {
        let ticket = DecodeTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending.insert(ticket);
        ticket
    }

    /// デコード完了を反映
    ///
    /// 完了時点の最新リストの末尾に追加する。失敗(`None`)は何も追加しない。
    /// 同じ札の二重完了は無視し、追加した場合のみ `true`。
    pub fn complete_decode(&mut self, ticket: DecodeTicket, decoded: Option<ImageAsset>) -> bool {
        if !self.pending.remove(&ticket) {
            return false;
        }
        match decoded {
            Some(asset) => {
                self.images.push(asset);
                true
            }
            None => false,
        }
    }

    /// デコード中の件数
    pub fn pending_decodes(&self) -> usize {
        self.pending.len()
    }

    /// 指定位置の画像を削除（確認なし）。範囲外は何もしない。
    pub fn remove(&mut self, index: usize) -> Option<ImageAsset> {
        if index >= self.images.len() {
            return None;
        }
        Some(self.images.remove(index))
    }

    pub fn shows_scroll_controls(&self) -> bool {
        self.images.len() > SCROLL_CONTROLS_THRESHOLD
    }

    /// 表示領域をずらす量(px)。位置は表示側が持つので、ここでは相対量だけ返す
    pub fn scroll(&self, direction: ScrollDirection) -> i32 {
        match direction {
            ScrollDirection::Left => -SCROLL_STEP_PX,
            ScrollDirection::Right => SCROLL_STEP_PX,
        }
    }

    /// 全画面表示を開く。範囲外なら `false`。
    pub fn open_fullscreen(&mut self, index: usize) -> bool {
        match self.images.get(index) {
            Some(asset) => {
                self.fullscreen = Some(asset.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_fullscreen(&mut self) {
        self.fullscreen = None;
    }

    pub fn fullscreen(&self) -> Option<&ImageAsset> {
        self.fullscreen.as_ref()
    }

    /// 全画面表示中のクリック処理。閉じた場合 `true`。
    pub fn click_fullscreen(&mut self, target: ModalClick) -> bool {
        if self.fullscreen.is_none() {
            return false;
        }
        match target {
            ModalClick::Backdrop | ModalClick::CloseButton => {
                self.close_fullscreen();
                true
            }
            ModalClick::Image => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry(&'static str);

    impl MediaSource for Entry {
        fn media_type(&self) -> String {
            self.0.to_string()
        }
    }

    fn store_with(n: usize) -> ImageStore {
        ImageStore::from_images((0..n).map(|i| ImageAsset::new(format!("img{}", i))).collect())
    }

    #[test]
    fn test_select_files_skips_non_images() {
        let entries = vec![Entry("image/png"), Entry("text/plain"), Entry("image/jpeg"), Entry("")];
        let selected = select_files(entries);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].0, "image/png");
        assert_eq!(selected[1].0, "image/jpeg");
    }

    #[test]
    fn test_select_clipboard_matches_image_kind() {
        let entries = vec![Entry("text/html"), Entry("image/png"), Entry("text/plain")];
        let selected = select_clipboard(entries);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, "image/png");
    }

    #[test]
    fn test_completion_order_decides_append_order() {
        let mut store = ImageStore::new();
        let from_file = store.begin_decode();
        let from_paste = store.begin_decode();
        assert_eq!(store.pending_decodes(), 2);

        // 貼り付け側が先に終わる
        assert!(store.complete_decode(from_paste, Some(ImageAsset::new("b"))));
        assert!(store.complete_decode(from_file, Some(ImageAsset::new("a"))));

        assert_eq!(store.images(), &[ImageAsset::new("b"), ImageAsset::new("a")]);
        assert_eq!(store.pending_decodes(), 0);
    }

    #[test]
    fn test_completion_is_applied_once() {
        let mut store = ImageStore::new();
        let ticket = store.begin_decode();
        assert!(store.complete_decode(ticket, Some(ImageAsset::new("a"))));
        assert!(!store.complete_decode(ticket, Some(ImageAsset::new("a"))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failed_decode_does_not_block_siblings() {
        let mut store = ImageStore::new();
        let broken = store.begin_decode();
        let ok = store.begin_decode();
        assert!(!store.complete_decode(broken, None));
        assert!(store.complete_decode(ok, Some(ImageAsset::new("ok"))));
        assert_eq!(store.images(), &[ImageAsset::new("ok")]);
        assert_eq!(store.pending_decodes(), 0);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut store = ImageStore::from_images(vec![ImageAsset::new("a"), ImageAsset::new("b")]);
        assert_eq!(store.remove(0), Some(ImageAsset::new("a")));
        assert_eq!(store.images(), &[ImageAsset::new("b")]);
        assert_eq!(store.remove(5), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_scroll_controls_threshold() {
        assert!(!store_with(6).shows_scroll_controls());
        assert!(store_with(7).shows_scroll_controls());
    }

    #[test]
    fn test_scroll_is_fixed_step() {
        let store = store_with(7);
        assert_eq!(store.scroll(ScrollDirection::Right), SCROLL_STEP_PX);
        assert_eq!(store.scroll(ScrollDirection::Right), SCROLL_STEP_PX);
        assert_eq!(store.scroll(ScrollDirection::Left), -SCROLL_STEP_PX);
    }

    #[test]
    fn test_scroll_step_ignores_image_count() {
        let mut store = store_with(9);
        store.remove(0);
        store.remove(0);
        assert_eq!(store.scroll(ScrollDirection::Right), 150);
        assert_eq!(store_with(100).scroll(ScrollDirection::Left), -150);
    }

    #[test]
    fn test_fullscreen_click_containment() {
        let mut store = store_with(2);
        assert!(!store.open_fullscreen(2));
        assert!(store.open_fullscreen(1));
        assert_eq!(store.fullscreen(), Some(&ImageAsset::new("img1")));

        assert!(!store.click_fullscreen(ModalClick::Image));
        assert!(store.fullscreen().is_some());

        assert!(store.click_fullscreen(ModalClick::Backdrop));
        assert!(store.fullscreen().is_none());

        store.open_fullscreen(0);
        assert!(store.click_fullscreen(ModalClick::CloseButton));
        assert!(store.fullscreen().is_none());
    }
}
