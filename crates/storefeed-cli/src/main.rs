mod batch;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefeed-cli")]
#[command(about = "Exports a storefront's product catalog as bulk-import CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Storefront base URL; overrides STOREFEED_SHOP_URL.
    #[arg(long, global = true)]
    shop_url: Option<String>,

    /// Output directory for the CSV files; overrides STOREFEED_OUT_DIR.
    #[arg(long, global = true)]
    out_dir: Option<String>,

    /// Number of CSV files to produce; overrides STOREFEED_BATCHES.
    #[arg(long, global = true)]
    batches: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog and write the batch CSV files (the default).
    Export,
    /// Print the output column schema, one column per line.
    Columns,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Flag overrides are applied through the environment so the env-driven
    // config loader stays the single source of truth.
    if let Some(shop_url) = &cli.shop_url {
        std::env::set_var("STOREFEED_SHOP_URL", shop_url);
    }
    if let Some(out_dir) = &cli.out_dir {
        std::env::set_var("STOREFEED_OUT_DIR", out_dir);
    }
    if let Some(batches) = cli.batches {
        std::env::set_var("STOREFEED_BATCHES", batches.to_string());
    }

    match cli.command {
        Some(Commands::Columns) => {
            for column in storefeed_core::COLUMNS {
                println!("{column}");
            }
            Ok(())
        }
        Some(Commands::Export) | None => {
            let config = storefeed_core::load_config_from_env()?;
            tracing::info!(
                shop_url = %config.shop_url,
                batches = config.batch_count,
                pages_per_batch = config.pages_per_batch,
                page_size = config.page_size,
                out_dir = %config.out_dir.display(),
                "starting catalog export"
            );

            let summary = batch::run_export(&config).await?;

            if summary.files_written.is_empty() {
                tracing::warn!("run finished without producing any files");
            } else {
                tracing::info!(
                    files = summary.files_written.len(),
                    rows = summary.total_rows,
                    "catalog export finished"
                );
            }
            Ok(())
        }
    }
}
