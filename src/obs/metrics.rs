// self
use crate::{
	error::FailureKind,
	obs::{FlowKind, FlowOutcome},
};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kakao_notify_flow_total",
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

/// Records the category of a failed flow (when enabled).
pub fn record_flow_failure(kind: FlowKind, failure: FailureKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kakao_notify_failure_total",
			"flow" => kind.as_str(),
			"kind" => failure.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, failure);
	}
}
