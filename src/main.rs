//! Ledgergrid main entry point

use anyhow::Context;
use clap::Parser;
use ledgergrid_api::start_server;
use ledgergrid_config::{Config, ConfigError};
use ledgergrid_rpc::LedgerService;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "ledgergrid")]
#[command(version = "0.1.0")]
#[command(about = "Paged, editable account and transaction grids", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // Logging is configured from the file, so it starts after loading
    let loaded = Config::load(args.config.clone());
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(ConfigError::FileNotFound { .. }) => Config::default(),
        Err(e) => anyhow::bail!("{}", e.to_details()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    match loaded {
        Ok(_) => log::info!("Config loaded from {}", args.config.display()),
        Err(e) => log::warn!("{}; using defaults", e),
    }

    let rt = Runtime::new().context("failed to start runtime")?;
    rt.block_on(async {
        let service = LedgerService::new();
        start_server(config, service).await
    })
}
