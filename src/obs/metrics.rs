// self
use crate::obs::{OpKind, OpOutcome};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"zuora_query_op_total",
			"op" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Adds the records received in one page to the global metrics recorder (when enabled).
pub fn record_page_records(kind: OpKind, records: usize) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("zuora_query_records_total", "op" => kind.as_str())
			.increment(u64::try_from(records).unwrap_or(u64::MAX));
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, records);
	}
}
