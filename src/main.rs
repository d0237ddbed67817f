//! roadmap-sync CLI entry point

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::Cli;
use cli::style::Stylize;
use roadmap_sync::config::{load_config, resolve_options};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = load_config(cli.config.as_deref())?;
    let options = resolve_options(cli.raw_options(), file_config)?;
    cli::sync::run_sync(options).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".error());
            ExitCode::FAILURE
        }
    }
}
