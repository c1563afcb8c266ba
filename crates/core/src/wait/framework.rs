use ngsync_protocol::{FrameworkProbe, FrameworkSettle, FrameworkSettleArgs, scripts};
use serde_json::Value;

use super::LOG;
use crate::budget::Budget;
use crate::error::{Error, Result};
use crate::page::PageHandle;
use crate::race::{RaceOutcome, until_settled_or_timed_out};

async fn evaluate_as<T>(page: &dyn PageHandle, script: &ngsync_protocol::PageScript, args: Vec<Value>) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	let value = page.evaluate(script, args).await?;
	serde_json::from_value(value).map_err(Error::from)
}

/// Waits until the page's framework reports no outstanding requests.
///
/// Pages without the framework global are ready immediately and no injector
/// lookup is attempted. Otherwise the in-page settle routine runs under its own
/// timer of `budget` while the host races it against the same budget. Returns
/// `false` (with one log record) when the framework stays busy past `budget`.
pub async fn until_framework_ready(page: &dyn PageHandle, budget: Budget, markers: &[String]) -> bool {
	let probe = match evaluate_as::<FrameworkProbe>(page, &scripts::FRAMEWORK_PROBE, Vec::new()).await {
		Ok(probe) => probe,
		Err(err) => return LOG.debug_and_return(false, "framework probe", &err),
	};
	if !probe.present {
		return true;
	}

	let args = FrameworkSettleArgs {
		budget_ms: budget.as_millis(),
		markers: markers.to_vec(),
	};
	let args = match serde_json::to_value(&args) {
		Ok(args) => args,
		Err(err) => return LOG.debug_and_return(false, "framework settle arguments", &err),
	};

	let outcome = until_settled_or_timed_out(
		|settle, _| async move {
			match evaluate_as::<FrameworkSettle>(page, &scripts::FRAMEWORK_SETTLE, vec![args]).await {
				Ok(settled) => settle.resolve(settled),
				Err(err) => settle.reject(err),
			};
		},
		|settle| {
			settle.resolve(FrameworkSettle {
				present: true,
				settled: false,
			});
		},
		budget,
	)
	.await;

	match outcome {
		Ok(RaceOutcome::Settled(FrameworkSettle { present: false, .. })) => true,
		Ok(RaceOutcome::Settled(FrameworkSettle { settled: true, .. })) => true,
		Ok(_) => {
			LOG.debug(format_args!("framework still busy after {budget}: budget exceeded"));
			false
		}
		Err(err) => LOG.debug_and_return(false, "framework readiness", &err),
	}
}
