//! Terminal host for timed quizzes and learning games.

#![forbid(unsafe_code)]

mod cli;
mod play;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use services::{ContentSource, InMemoryCatalog, JsonCatalog, PlayConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "app failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = PlayConfig::load_or_default(cli.config.as_deref())
        .await
        .context("loading config")?;
    let builtin: Arc<dyn ContentSource> =
        Arc::new(InMemoryCatalog::builtin().context("building built-in content")?);

    match cli.command {
        Command::Quiz { file, minutes } => {
            let source: Arc<dyn ContentSource> = match file {
                Some(path) => Arc::new(JsonCatalog::new(path, builtin)),
                None => builtin,
            };
            play::quiz::run(source.as_ref(), &config, minutes).await
        }
        Command::Memory { seed } => play::memory::run(builtin.as_ref(), &config, seed).await,
        Command::Words { level, seconds } => {
            play::words::run(builtin.as_ref(), &config, level, seconds).await
        }
    }
}
