//! [`PageHandle`] over a Chromium page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use ngsync::{Budget, BrowserHandle, Error, PageHandle, PageScript, Result, TargetId, is_negligible, is_truthy};
use serde_json::Value;
use tokio::time::Instant;

use crate::browser::ChromiumBrowser;
use crate::error::from_cdp;

/// A Chromium tab.
///
/// Scripts run through `Runtime.evaluate` with promises awaited and results
/// returned by value. Condition-waits poll every `poll_interval`.
#[derive(Clone)]
pub struct ChromiumPage {
	page: Page,
	target: TargetId,
	browser: Arc<ChromiumBrowser>,
	poll_interval: Duration,
}

impl ChromiumPage {
	pub(crate) fn new(page: Page, browser: Arc<ChromiumBrowser>, poll_interval: Duration) -> Self {
		let target = TargetId::new(page.target_id().as_ref());
		Self {
			page,
			target,
			browser,
			poll_interval,
		}
	}

	/// Returns the underlying chromiumoxide page.
	pub fn inner(&self) -> &Page {
		&self.page
	}

	/// Returns the page URL, if known.
	pub async fn url(&self) -> Result<Option<String>> {
		self.page.url().await.map_err(from_cdp)
	}
}

#[async_trait]
impl PageHandle for ChromiumPage {
	fn target_id(&self) -> TargetId {
		self.target.clone()
	}

	fn browser(&self) -> Arc<dyn BrowserHandle> {
		self.browser.clone()
	}

	async fn evaluate(&self, script: &PageScript, args: Vec<Value>) -> Result<Value> {
		let expression = script.invocation(&args)?;
		let params = EvaluateParams::builder()
			.expression(expression)
			.await_promise(true)
			.return_by_value(true)
			.build()
			.map_err(Error::InvalidArgument)?;

		let result = self.page.evaluate_expression(params).await.map_err(from_cdp)?;
		Ok(result.value().cloned().unwrap_or(Value::Null))
	}

	async fn wait_for_function(&self, script: &PageScript, args: Vec<Value>, timeout: Budget) -> Result<Value> {
		let deadline = Instant::now() + timeout.as_duration();
		match poll_until_truthy(deadline, self.poll_interval, || self.evaluate(script, args.clone())).await? {
			Some(value) => Ok(value),
			None => Err(Error::Timeout(format!("{script} not satisfied within {timeout}"))),
		}
	}

	async fn goto(&self, url: &str) -> Result<()> {
		self.page.goto(url).await.map_err(|err| Error::Navigation {
			url: url.to_string(),
			message: err.to_string(),
		})?;
		Ok(())
	}
}

/// Calls `attempt` every `interval` until it yields a truthy value.
///
/// Returns `Ok(None)` once `deadline` passes, including when an attempt is
/// still in flight at that point. Negligible errors count as a falsy result.
async fn poll_until_truthy<F, Fut>(deadline: Instant, interval: Duration, mut attempt: F) -> Result<Option<Value>>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<Value>>,
{
	loop {
		let Ok(outcome) = tokio::time::timeout_at(deadline, attempt()).await else {
			return Ok(None);
		};
		match outcome {
			Ok(value) if is_truthy(&value) => return Ok(Some(value)),
			Ok(_) => {}
			Err(err) if err.is_timeout() => return Ok(None),
			// The document may be replaced between polls.
			Err(err) if is_negligible(&err.to_string()) => {}
			Err(err) => return Err(err),
		}

		let now = Instant::now();
		if now >= deadline {
			return Ok(None);
		}
		tokio::time::sleep(interval.min(deadline - now)).await;
	}
}

impl std::fmt::Debug for ChromiumPage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChromiumPage")
			.field("target", &self.target)
			.field("poll_interval", &self.poll_interval)
			.finish_non_exhaustive()
	}
}
