mod scrape;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "custard-cli")]
#[command(about = "Frozen custard flavor-of-the-day command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every flavor source once and print the result
    Scrape {
        /// Print the aggregate JSON document instead of stand cards
        #[arg(long)]
        json: bool,

        /// Treat this date (YYYY-MM-DD) as today instead of the wall clock
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List the configured flavor sources and the pages they read
    Sources,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = custard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scrape { json, date }) => scrape::run_scrape(&config, json, date).await?,
        Some(Commands::Sources) => scrape::run_sources(&config),
        None => println!("custard-cli ready; try `custard-cli scrape`"),
    }

    Ok(())
}
