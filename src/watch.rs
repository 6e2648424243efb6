use anyhow::Result;
use clap::Args;
use tracing::{error, Instrument};

use crate::config::AppConfig;
use crate::notify::TelegramNotifier;
use crate::reconcile::{self, Reconciler};
use crate::telemetry;
use crate::upstream::PracticumClient;
use crate::util::time::cursor_or_now;

#[derive(Args, Default)]
pub struct WatchCmd {
    /// Cursor seed: Unix seconds, "2d", "YYYY-MM-DD" or RFC3339 (default: now)
    #[arg(long)] pub from_date: Option<String>,
    /// Stop after this many iterations; runs until Ctrl-C otherwise
    #[arg(long)] pub max_iterations: Option<u64>,
}

pub async fn run(cfg: &AppConfig, args: WatchCmd) -> Result<()> {
    let log = telemetry::watch();
    let cursor = cursor_or_now(args.from_date.as_deref())?;
    let root = log.root_span_kv([
        ("from_date", cursor.as_unix().to_string()),
        ("retry_period_secs", cfg.retry_period.as_secs().to_string()),
        ("endpoint", cfg.endpoint.to_string()),
    ]);

    let api = PracticumClient::new(cfg)?;
    let notifier = TelegramNotifier::new(cfg)?;
    let mut reconciler = Reconciler::new(&api, &notifier, cursor);

    let iterations = reconcile::watch(&mut reconciler, cfg.retry_period, args.max_iterations, ctrl_c())
        .instrument(root)
        .await;
    log.info(format!("👋 stopped after {} iteration(s)", iterations));
    Ok(())
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // without a signal handler only process kill stops the loop
        error!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
