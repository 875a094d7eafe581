use clap::Parser;
use std::sync::Arc;
use tracing::info;

use ce_core::{Result, RewriteModel};
use ce_enrichment::{Enricher, GeminiModel};
use ce_scraper::BlogScraper;
use ce_web::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape, enrich and serve blog articles", long_about = None)]
struct Cli {
    /// Storage backend to use
    #[arg(long, default_value = "sqlite", value_parser = ["sqlite", "memory"])]
    storage: String,

    /// Connection string for the storage backend
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Scrape the fixed source URL list and store new articles
    Scrape,
    /// Rewrite all pending articles with the LLM
    Enrich,
    /// Serve the article API over HTTP
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3001)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store = ce_storage::create_store(&cli.storage, cli.database_url.as_deref()).await?;
    info!("💾 Storage initialized successfully (using {})", cli.storage);

    match cli.command {
        Commands::Scrape => {
            let scraper = BlogScraper::new()?;
            let report = scraper.run(store).await?;
            info!(
                "🎉 Scraping complete: {} saved, {} skipped, {} failed",
                report.saved, report.skipped, report.failed
            );
        }
        Commands::Enrich => {
            let model = Arc::new(GeminiModel::from_env()?);
            info!("🧠 Using {} for article rewriting", model.name());
            let report = Enricher::new(store, model).run().await?;
            info!(
                "🎉 Enrichment complete: {} enriched, {} failed, {} total",
                report.enriched, report.failed, report.total
            );
        }
        Commands::Serve { port } => {
            ce_web::serve(AppState::new(store), port).await?;
        }
    }

    Ok(())
}
