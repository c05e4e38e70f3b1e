//! PDF Enhancer command-line client
//!
//! Prints one JSON command result per invocation and exits non-zero when
//! the command failed.

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod state;

use cli::Cli;
use enhancer_core::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    enhancer_core::init_logging();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Some(data_dir) = cli.data_dir {
        config.database_path = data_dir.join("storage.db");
        config.data_dir = data_dir;
    }

    let state = AppState::new(config).context("failed to open client state")?;

    let result = commands::dispatch(&state, cli.command).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}
