use clap::Parser;
use order_form::{cli, config, error, session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use order_form_common::company::search;
use order_form_common::{OrderSchema, OrderValues, Schema};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::New { companies, output } => {
            println!("📝 order-form - 注文入力\n");

            let companies = config.companies(companies.as_deref())?;
            if cli.verbose {
                println!("  会社リスト: {}件", companies.len());
            }

            session::run_interactive_order(companies, &config, output.as_deref(), cli.verbose).await?;
        }

        Commands::Validate { input } => {
            println!("🔍 order-form - 注文検証\n");

            if !input.exists() {
                return Err(error::OrderFormError::FileNotFound(input.display().to_string()));
            }
            let content = std::fs::read_to_string(&input)?;
            let order: OrderValues = serde_json::from_str(&content)?;

            match OrderSchema.validate(&order) {
                Ok(()) => {
                    println!("✔ 商品{}件", order.items.len());
                    println!("\n✅ 検証OK");
                }
                Err(errors) => {
                    for e in errors.iter() {
                        println!("  ⚠ {}: {}", e.path, e.message);
                    }
                    return Err(errors.into());
                }
            }
        }

        Commands::Companies { query, companies } => {
            let companies = config.companies(companies.as_deref())?;
            let query = query.unwrap_or_default();
            let hits = search(&companies, &query);

            if hits.is_empty() {
                println!("{}", order_form_common::company::COMPANY_NOT_FOUND);
            }
            for company in hits {
                println!("  {}  {}", company.id, company.name);
            }
        }

        Commands::Config { set_companies, set_max_image_size, show } => {
            let mut config = config;

            if let Some(path) = set_companies {
                config.set_companies_path(path)?;
                println!("✔ 会社リストを設定しました");
            }

            if let Some(px) = set_max_image_size {
                config.set_max_image_size(px)?;
                println!("✔ 画像サイズ上限を設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  会社リスト: {}",
                    config
                        .companies_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  画像サイズ上限: {}px", config.max_image_size);
                println!(
                    "  出力先: {}",
                    config
                        .default_output
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "なし".into())
                );
            }
        }
    }

    Ok(())
}
