//! 送信処理（現状はサーバ送信なし: 表示とJSON書き出しのみ）

use order_form_common::{OrderValues, Submitter};
use std::path::PathBuf;

pub struct PrintSubmitter {
    output: Option<PathBuf>,
    verbose: bool,
    submitted: usize,
}

impl PrintSubmitter {
    pub fn new(output: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            output,
            verbose,
            submitted: 0,
        }
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }
}

impl Submitter for PrintSubmitter {
    fn submit(&mut self, order: &OrderValues) -> order_form_common::Result<()> {
        let image_count: usize = order.items.iter().map(|i| i.images.len()).sum();
        println!(
            "✔ 注文データ: 会社={} 受付日={} 商品{}件 画像{}枚",
            order.company_id,
            order.received_date,
            order.items.len(),
            image_count
        );

        if self.verbose {
            for (index, item) in order.items.iter().enumerate() {
                println!(
                    "  {}. {} {} {} [{}]",
                    index + 1,
                    item.product_name,
                    item.quantity,
                    item.unit,
                    item.status.label()
                );
            }
        }

        if let Some(path) = &self.output {
            let json = serde_json::to_string_pretty(order)?;
            std::fs::write(path, json)?;
            println!("✔ 保存: {}", path.display());
        }

        self.submitted += 1;
        Ok(())
    }
}
