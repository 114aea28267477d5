use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pricewatch")]
#[command(about = "Product price monitor with email alerts")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
}
