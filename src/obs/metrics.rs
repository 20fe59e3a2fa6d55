// self
use crate::obs::{FlowKind, FlowOutcome};

/// Counter incremented once per exchange phase event, labeled by `flow` and `outcome`.
pub const FLOW_COUNTER: &str = "linkedin_oauth1_flow_total";

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			FLOW_COUNTER,
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

