//! 受注入力フォーム CLI
//!
//! 明細エディタの状態機械は order_form_common にあり、ここでは端末での入力、
//! 画像ファイルの取り込み、設定、送信（表示・JSON書き出し）を扱う。

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod render;
pub mod session;
pub mod submit;
