use ngsync::ReadyPage;

use super::OpenPage;
use crate::context::{CommandContext, parse_url};
use crate::error::{CliError, Result};
use crate::output::NavigateData;

pub async fn execute(ctx: &CommandContext, url: &str) -> Result<()> {
	let url = parse_url(url)?;
	let open = OpenPage::open(ctx).await?;

	let readiness = ctx.readiness();
	ReadyPage::new(&open.page, &readiness).navigate_until_ready(&url, None).await;
	let data = open
		.page
		.url()
		.await
		.map(|actual_url| NavigateData { url, actual_url })
		.map_err(CliError::from);

	open.finish(ctx, "navigate", data).await
}
