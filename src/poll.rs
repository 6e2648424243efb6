use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::Instrument;

use crate::config::AppConfig;
use crate::notify::TelegramNotifier;
use crate::output::types::Meta;
use crate::reconcile::{Delivery, Reconciler};
use crate::telemetry;
use crate::upstream::PracticumClient;
use crate::util::time::cursor_or_now;

#[derive(Args)]
pub struct PollCmd {
    /// Cursor seed: Unix seconds, "2d", "YYYY-MM-DD" or RFC3339 (default: now)
    #[arg(long)] pub from_date: Option<String>,
    /// Send the message instead of only printing it
    #[arg(long, default_value_t = false)] pub apply: bool,
}

/// One iteration of the loop, for checking tokens and endpoints by hand.
pub async fn run(cfg: &AppConfig, args: PollCmd, json: bool) -> Result<()> {
    let log = telemetry::poll();
    let cursor = cursor_or_now(args.from_date.as_deref())?;
    let root = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("from_date", cursor.as_unix().to_string()),
    ]);

    let api = PracticumClient::new(cfg)?;
    let notifier = TelegramNotifier::new(cfg)?;
    let mut reconciler = Reconciler::new(&api, &notifier, cursor);

    let t0 = Instant::now();
    let report = reconciler.run_once(args.apply).instrument(root).await;
    let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()), from_date: Some(report.from_date) };

    if json {
        if args.apply { log.result(&report, Some(meta))?; } else { log.plan(&report, Some(meta))?; }
        return Ok(());
    }

    match report.delivery {
        Delivery::Planned => {
            log.info(format!("📝 Would send ({}): {}", report.source.as_str(), report.message));
            log.info("   Use --apply to send.");
        }
        Delivery::Delivered => log.info(format!("✅ Sent ({}): {}", report.source.as_str(), report.message)),
        Delivery::Failed => anyhow::bail!("message could not be delivered: {}", report.message),
        Delivery::Suppressed => log.info("↩️ Nothing new to send."),
    }
    Ok(())
}
