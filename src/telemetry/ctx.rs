use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{info, debug, error, Span};

use super::emit;
use crate::output::types::Meta;
use crate::reconcile::{Delivery, IterationReport};

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span {
        let span = ph.span();
        debug!(parent: &span, op = %self.op_name(), phase = ph.name(), "span_start");
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{} {}", msg, details); }
    }

    pub fn debug_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { debug!(op = %self.op_name(), details = %details, "{}", msg); }
        else { debug!("{} {}", msg, details); }
    }

    pub fn error_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { error!(op = %self.op_name(), details = %details, "{}", msg); }
        else { error!("{} {}", msg, details); }
    }

    pub fn plan<T: Serialize>(&self, plan: &T, meta: Option<Meta>) -> Result<()> { emit::print_plan(self.op_name(), plan, meta) }
    pub fn result<T: Serialize>(&self, result: &T, meta: Option<Meta>) -> Result<()> { emit::print_result(self.op_name(), result, meta) }
}

impl LogCtx<crate::telemetry::ops::watch::Watch> {
    pub fn iteration(&self, n: u64, report: &IterationReport) {
        let (source, delivery, cursor) = (report.source.as_str(), report.delivery.as_str(), report.cursor.as_unix());
        if self.json { info!(op = %self.op_name(), iteration = n, source, delivery, cursor, "iteration"); }
        else {
            let icon = match report.delivery {
                Delivery::Delivered => "✅",
                Delivery::Suppressed | Delivery::Planned => "↩️",
                Delivery::Failed => "⚠️",
            };
            info!("{} iteration {} — source={} delivery={} cursor={}", icon, n, source, delivery, cursor);
        }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
