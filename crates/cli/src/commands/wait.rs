use ngsync::{PageHandle, StageOutcome};

use super::OpenPage;
use crate::context::{CommandContext, parse_url};
use crate::error::Result;
use crate::output::{StageReport, WaitData};

pub async fn execute(ctx: &CommandContext, url: &str, framework_only: bool) -> Result<()> {
	let url = parse_url(url)?;
	let open = OpenPage::open(ctx).await?;
	let data = run_stages(ctx, &open.page, &url, framework_only).await;
	open.finish(ctx, "wait", data).await
}

async fn run_stages(ctx: &CommandContext, page: &dyn PageHandle, url: &str, framework_only: bool) -> Result<WaitData> {
	page.goto(url).await?;

	let readiness = ctx.readiness();
	let outcomes = if framework_only {
		vec![readiness.run_framework_stage(page, None).await]
	} else {
		readiness.run_action_stages(page, None).await
	};

	Ok(WaitData {
		url: url.to_string(),
		stages: outcomes.iter().map(report).collect(),
	})
}

fn report(outcome: &StageOutcome) -> StageReport {
	StageReport {
		stage: outcome.stage.to_string(),
		ready: outcome.ready,
		budget_ms: outcome.budget.as_millis(),
		elapsed_ms: u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use ngsync::Budget;

	use super::*;

	#[test]
	fn report_carries_stage_outcome() {
		let outcome = StageOutcome {
			stage: "document",
			ready: false,
			budget: Budget::from_millis(10_000),
			elapsed: Duration::from_millis(1_234),
		};
		let report = report(&outcome);

		assert_eq!(report.stage, "document");
		assert!(!report.ready);
		assert_eq!(report.budget_ms, 10_000);
		assert_eq!(report.elapsed_ms, 1_234);
	}
}
