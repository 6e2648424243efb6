use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Poll;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Validate, Interpret, Notify }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Validate => "validate",
        Phase::Interpret => "interpret",
        Phase::Notify => "notify",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Validate => info_span!("validate"),
        Phase::Interpret => info_span!("interpret"),
        Phase::Notify => info_span!("notify"),
    }}
}

impl OpMarker for Poll {
    const NAME: &'static str = "poll";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("poll") }
}
