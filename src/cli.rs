use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "order-form")]
#[command(about = "受注入力フォーム（会社・受付日・商品明細）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話形式で注文を入力
    New {
        /// 会社リストJSONファイル
        #[arg(short, long)]
        companies: Option<PathBuf>,

        /// 送信時に注文JSONを書き出すファイル
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保存済みの注文JSONを検証
    Validate {
        /// 注文JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 会社を検索（名前の部分一致）
    Companies {
        /// 検索文字列（省略時は全件）
        #[arg(short, long)]
        query: Option<String>,

        /// 会社リストJSONファイル
        #[arg(short, long)]
        companies: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 会社リストJSONを設定
        #[arg(long)]
        set_companies: Option<PathBuf>,

        /// 添付画像の長辺上限(px, 0で縮小なし)
        #[arg(long)]
        set_max_image_size: Option<u32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
