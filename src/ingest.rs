//! 画像ファイルの取り込み
//!
//! 指定パス（ファイル/フォルダ）から画像を集め、ブロッキングタスクで並行デコードする。
//! デコードが終わった順に明細へ追加するため、追加順は指定順と一致しない場合がある。

use crate::error::{OrderFormError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use indicatif::{ProgressBar, ProgressStyle};
use order_form_common::images::select_files;
use order_form_common::{DecodeTicket, FieldArray, ImageAsset, ItemId, MediaSource};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// 再エンコード時のJPEG品質
const JPEG_QUALITY: u8 = 85;

/// 取り込み候補のファイル
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    media_type: String,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let media_type = media_type_for(&path).to_string();
        Self { path, media_type }
    }
}

impl MediaSource for SourceFile {
    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

/// 拡張子からMIMEタイプを推定
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// パス群を取り込み候補に展開（フォルダは直下のみ、ファイル名順）。画像以外は除外。
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(OrderFormError::FileNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            let mut entries: Vec<PathBuf> = WalkDir::new(path)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| e.into_path())
                .collect();
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            sources.extend(entries.into_iter().map(SourceFile::new));
        } else {
            sources.push(SourceFile::new(path.clone()));
        }
    }

    Ok(select_files(sources))
}

/// 1ファイルをデコードし、Data URLの画像にする
///
/// `max_size` を超える場合は縦横比を保って縮小する（0なら縮小しない）。
pub fn decode_to_asset(path: &Path, max_size: u32) -> Result<ImageAsset> {
    let load_err = |e: &dyn std::fmt::Display| {
        OrderFormError::ImageLoad(format!("{}: {}", path.display(), e))
    };

    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| load_err(&e))?;
    let format = reader.format();
    let mut img = reader.decode().map_err(|e| load_err(&e))?;

    if max_size > 0 && (img.width() > max_size || img.height() > max_size) {
        img = img.thumbnail(max_size, max_size);
    }

    let (mime_type, bytes) = match format {
        Some(ImageFormat::Jpeg) => ("image/jpeg", encode_jpeg(&img).map_err(|e| load_err(&e))?),
        _ => ("image/png", encode_png(&img).map_err(|e| load_err(&e))?),
    };

    Ok(ImageAsset::from_base64(mime_type, &STANDARD.encode(bytes)))
}

fn encode_jpeg(img: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    img.to_rgb8().write_with_encoder(encoder)?;
    Ok(buffer)
}

fn encode_png(img: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// 取り込み結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub added: usize,
    pub failed: usize,
}

/// 指定行へ画像を並行取り込み
///
/// 1件のデコード失敗は他に影響しない。行が途中で削除された場合、結果は捨てる。
pub async fn ingest_into(
    items: &mut FieldArray,
    id: ItemId,
    sources: Vec<SourceFile>,
    max_size: u32,
    verbose: bool,
) -> IngestReport {
    let mut report = IngestReport::default();
    if sources.is_empty() {
        return report;
    }

    let progress = ProgressBar::new(sources.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut tasks = JoinSet::new();
    let mut issued = Vec::with_capacity(sources.len());
    for source in sources {
        let Some(ticket) = items.begin_decode(id) else {
            break;
        };
        issued.push(ticket);
        tasks.spawn_blocking(move || {
            let decoded = decode_to_asset(&source.path, max_size);
            (ticket, source.path, decoded)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (ticket, path, decoded) = match joined {
            Ok(done) => done,
            Err(e) => {
                report.failed += 1;
                progress.println(format!("  ⚠ デコードタスク異常終了: {}", e));
                progress.inc(1);
                continue;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match decoded {
            Ok(asset) => {
                if items.complete_decode(id, ticket, Some(asset)) {
                    report.added += 1;
                }
            }
            Err(e) => {
                items.complete_decode(id, ticket, None);
                report.failed += 1;
                if verbose {
                    progress.println(format!("  ⚠ スキップ: {}", e));
                }
            }
        }

        progress.set_message(file_name);
        progress.inc(1);
    }

    // 異常終了したタスクの札は戻ってこないので、ここで失敗扱いにする
    release_unfinished(items, id, &issued);

    progress.finish_and_clear();
    report
}

/// 未完了の札をすべて失敗として閉じる。完了済みの札は無視される。
pub fn release_unfinished(items: &mut FieldArray, id: ItemId, tickets: &[DecodeTicket]) {
    for ticket in tickets {
        items.complete_decode(id, *ticket, None);
    }
}
