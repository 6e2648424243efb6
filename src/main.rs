use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::error;

mod config;
mod error;
mod homework;
mod notify;
mod output;
mod poll;
mod reconcile;
mod telemetry;
#[cfg(test)]
mod testing;
mod upstream;
mod util;
mod watch;

#[derive(Parser)]
#[command(name = "hwbot", about = "Telegram notifier for homework review statuses")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the status API forever and forward changes (default)
    Watch(watch::WatchCmd),
    /// Run a single poll iteration
    Poll(poll::PollCmd),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and HWBOT_LOG_FORMAT
    telemetry::config::init_tracing();

    let cfg = match config::AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "configuration incomplete, not starting");
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command.unwrap_or(Commands::Watch(watch::WatchCmd::default())) {
        Commands::Watch(args) => watch::run(&cfg, args).await?,
        Commands::Poll(args) => poll::run(&cfg, args, cli.json).await?,
    }

    Ok(ExitCode::SUCCESS)
}
