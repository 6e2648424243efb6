use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Watch;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Iteration, Sleep }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Iteration => "iteration", Phase::Sleep => "sleep" } }
    fn span(&self) -> Span { match self { Phase::Iteration => info_span!("iteration"), Phase::Sleep => info_span!("sleep") } }
}

impl OpMarker for Watch {
    const NAME: &'static str = "watch";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("watch") }
}
