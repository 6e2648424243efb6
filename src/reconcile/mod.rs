//! The poll loop: fetch, validate, interpret, dedupe, notify, sleep.
//!
//! One iteration runs to completion before the next starts. Every failure
//! except a missing config (handled before we get here) is turned into a
//! chat message and the loop keeps going.

pub mod messages;
mod state;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tracing::Instrument;

use crate::error::PollError;
use crate::homework::{interpret, should_notify, validate};
use crate::notify::Notifier;
use crate::telemetry::{self, ctx::LogCtx};
use crate::telemetry::ops::poll::{Phase as PollPhase, Poll};
use crate::telemetry::ops::watch::Phase as WatchPhase;
use crate::upstream::StatusApi;

pub use state::{LoopState, PollCursor};

/// Where this iteration's candidate message came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Verdict,
    NoItems,
    FetchFailed,
    ShapeInvalid,
    FieldInvalid,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Verdict => "verdict",
            Source::NoItems => "no_items",
            Source::FetchFailed => "fetch_failed",
            Source::ShapeInvalid => "shape_invalid",
            Source::FieldInvalid => "field_invalid",
        }
    }

    fn of_error(err: &PollError) -> Self {
        match err {
            PollError::Fetch(_) => Source::FetchFailed,
            PollError::Shape(_) => Source::ShapeInvalid,
            PollError::Field(_) => Source::FieldInvalid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Same text as the last delivered message.
    Suppressed,
    /// Would have been sent; dry run.
    Planned,
    Delivered,
    Failed,
}

impl Delivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Suppressed => "suppressed",
            Delivery::Planned => "planned",
            Delivery::Delivered => "delivered",
            Delivery::Failed => "failed",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct IterationReport {
    pub source: Source,
    pub message: String,
    pub delivery: Delivery,
    pub from_date: i64,
    pub cursor: PollCursor,
}

pub struct Reconciler<'a, A, N> {
    api: &'a A,
    notifier: &'a N,
    state: LoopState,
    log: LogCtx<Poll>,
}

impl<'a, A: StatusApi, N: Notifier> Reconciler<'a, A, N> {
    pub fn new(api: &'a A, notifier: &'a N, cursor: PollCursor) -> Self {
        Reconciler { api, notifier, state: LoopState::new(cursor), log: telemetry::poll() }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Run one full iteration. With `apply == false` nothing is sent and
    /// the state is left untouched.
    pub async fn run_once(&mut self, apply: bool) -> IterationReport {
        let from_date = self.state.cursor().as_unix();

        let (source, message) = match self.candidate(from_date).await {
            Ok(c) => c,
            Err(err) => {
                self.log.error_kv("poll failed", [("kind", err.kind().to_string()), ("error", err.to_string())]);
                (Source::of_error(&err), messages::for_error(&err))
            }
        };

        let delivery = if !should_notify(&message, self.state.last_notified()) {
            self.log.debug_kv("message unchanged, not sending", [("message", message.clone())]);
            Delivery::Suppressed
        } else if !apply {
            Delivery::Planned
        } else {
            self.deliver(&message).await
        };

        IterationReport { source, message, delivery, from_date, cursor: self.state.cursor() }
    }

    async fn candidate(&self, from_date: i64) -> Result<(Source, String), PollError> {
        let raw = self
            .api
            .homework_statuses(from_date)
            .instrument(self.log.span(&PollPhase::Fetch))
            .await?;
        if let Some(current) = raw.get("current_date") {
            self.log.debug_kv("status API answered", [("current_date", current.to_string())]);
        }

        let items = {
            let _s = self.log.span(&PollPhase::Validate).entered();
            validate(&raw)?
        };
        let Some(first) = items.first() else {
            return Ok((Source::NoItems, messages::NO_CHANGE.to_string()));
        };

        let verdict = {
            let _s = self.log.span(&PollPhase::Interpret).entered();
            interpret(first)?
        };
        Ok((Source::Verdict, verdict))
    }

    async fn deliver(&mut self, message: &str) -> Delivery {
        let sent = self
            .notifier
            .send(message)
            .instrument(self.log.span(&PollPhase::Notify))
            .await;
        match sent {
            Ok(()) => {
                self.state.record_delivery(message.to_string());
                self.log.info_kv("📨 sent", [("message", message.to_string())]);
                Delivery::Delivered
            }
            Err(err) => {
                self.log.error_kv("delivery failed", [("message", message.to_string()), ("error", err.to_string())]);
                Delivery::Failed
            }
        }
    }
}

/// Poll forever at a fixed period.
///
/// Returns when `shutdown` resolves during a sleep, or after `max_iterations`
/// iterations if set.
pub async fn watch<A, N, S>(
    reconciler: &mut Reconciler<'_, A, N>,
    period: Duration,
    max_iterations: Option<u64>,
    shutdown: S,
) -> u64
where
    A: StatusApi,
    N: Notifier,
    S: Future<Output = ()>,
{
    let log = telemetry::watch();
    tokio::pin!(shutdown);

    let mut done = 0u64;
    loop {
        let report = reconciler
            .run_once(true)
            .instrument(log.span(&WatchPhase::Iteration))
            .await;
        done += 1;
        log.iteration(done, &report);

        if max_iterations.is_some_and(|max| done >= max) {
            return done;
        }

        tokio::select! {
            _ = tokio::time::sleep(period).instrument(log.span(&WatchPhase::Sleep)) => {}
            _ = &mut shutdown => {
                log.info("🛑 shutdown requested, stopping");
                return done;
            }
        }
    }
}
