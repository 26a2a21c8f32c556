use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "brandbeat-cli")]
#[command(about = "brandbeat command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the news pipeline once for a brand and print the JSON result.
    Fetch { brand: String },
    /// Cache maintenance.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Subcommand)]
enum CacheAction {
    /// Delete every cached entry.
    Purge,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = brandbeat_core::load_app_config()?;
    let news = brandbeat_news::NewsService::from_config(&config)?;

    match cli.command {
        Commands::Fetch { brand } => {
            let result = news.run(&brand).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Cache {
            action: CacheAction::Purge,
        } => {
            let removed = news.cache().purge()?;
            println!("removed {removed} cache entries");
        }
    }

    Ok(())
}
