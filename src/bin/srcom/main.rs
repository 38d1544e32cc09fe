mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use srcom::{Client, Configuration};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `--debug` wins over `RUST_LOG`; without either only warnings are shown.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("srcom=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> commands::CommandResult {
    let config = Configuration::builder()
        .base_url(cli.base_url)
        .maybe_api_key(cli.api_key)
        .max_retries(cli.max_retries)
        .debug_logging(cli.debug)
        .build()?;
    let client = Client::new(config)?;

    commands::handle(&client, cli.command, cli.format).await
}
