//! Click helper.

use ngsync_protocol::scripts;

use super::{ReadyPage, selector_arg};
use crate::budget::Budget;
use crate::logger::Logger;
use crate::page::is_truthy;

const LOG: Logger = Logger::new("ngsync:click");

impl ReadyPage<'_> {
	/// Clicks `selector` if it exists, waiting for action readiness alongside.
	///
	/// The readiness wait and the click are driven concurrently; the call
	/// completes once both have. Returns `true` if the element existed and the
	/// click was dispatched.
	pub async fn click_if_exists(&self, selector: &str, label: &str, budget: Option<Budget>) -> bool {
		let exists = match self.page.evaluate(&scripts::ELEMENT_EXISTS, selector_arg(selector)).await {
			Ok(found) => is_truthy(&found),
			Err(err) => LOG.debug_and_return(false, format_args!("{selector} for {label} error"), &err),
		};

		let mut clicked = false;
		if exists {
			let ((), result) = tokio::join!(
				self.wait_until_action_ready(budget),
				self.page.evaluate(&scripts::CLICK, selector_arg(selector)),
			);
			clicked = match result {
				Ok(value) => is_truthy(&value),
				Err(err) => LOG.debug_and_return(false, format_args!("{selector} for {label} error"), &err),
			};
		}

		if clicked {
			LOG.debug(format_args!("{selector} for {label}"));
		} else {
			LOG.debug(format_args!("{selector} for {label} not found"));
		}
		clicked
	}
}
