//! Navigation helper.

use super::ReadyPage;
use crate::budget::Budget;
use crate::logger::Logger;

const LOG: Logger = Logger::new("ngsync:navigate");

impl ReadyPage<'_> {
	/// Navigates to `url` and waits for action readiness.
	///
	/// A failed navigation is logged and the readiness wait still runs.
	pub async fn navigate_until_ready(&self, url: &str, budget: Option<Budget>) {
		if let Err(err) = self.page.goto(url).await {
			LOG.debug_error(format_args!("{url} error"), &err);
		}
		self.wait_until_action_ready(budget).await;
		LOG.debug(format_args!("to {url}"));
	}
}
