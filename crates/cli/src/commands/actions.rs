use ngsync::ReadyPage;

use super::OpenPage;
use crate::context::{CommandContext, parse_url};
use crate::error::{CliError, Result};
use crate::output::ActionData;

pub async fn click(ctx: &CommandContext, url: &str, selector: &str, label: &str) -> Result<()> {
	let url = parse_url(url)?;
	let open = OpenPage::open(ctx).await?;

	let readiness = ctx.readiness();
	let ready = ReadyPage::new(&open.page, &readiness);
	ready.navigate_until_ready(&url, None).await;
	let applied = ready.click_if_exists(selector, label, None).await;

	open.finish(ctx, "click", outcome(selector, label, applied)).await
}

pub async fn type_text(ctx: &CommandContext, url: &str, selector: &str, value: &str, label: &str) -> Result<()> {
	let url = parse_url(url)?;
	let open = OpenPage::open(ctx).await?;

	let readiness = ctx.readiness();
	let ready = ReadyPage::new(&open.page, &readiness);
	ready.navigate_until_ready(&url, None).await;
	let applied = ready.type_if_exists(selector, value, label).await;

	open.finish(ctx, "type", outcome(selector, label, applied)).await
}

fn outcome(selector: &str, label: &str, applied: bool) -> Result<ActionData> {
	if !applied {
		return Err(CliError::ElementNotFound {
			selector: selector.to_string(),
		});
	}
	Ok(ActionData {
		selector: selector.to_string(),
		label: label.to_string(),
		applied,
	})
}
