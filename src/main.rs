// pricewatch: scrape a product page and email an alert when the price drops

use clap::Parser;

mod alerts;
mod cli;
mod config;
mod fetcher;
mod monitor;

use cli::Cli;
use config::Config;
use monitor::Monitor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    let mut monitor = Monitor::new(config)?;
    monitor.run().await
}
