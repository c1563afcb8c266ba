//! Chromium launch and page lifecycle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use ngsync::{Budget, Error, ReadinessConfig, Result};
use tokio::task::JoinHandle;

use crate::browser::ChromiumBrowser;
use crate::error::from_cdp;
use crate::page::ChromiumPage;

/// Options for launching Chromium.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
	/// Run without a visible window.
	pub headless: bool,
	/// Chromium/Chrome executable; discovered from the environment when `None`.
	pub executable: Option<PathBuf>,
	/// Extra command-line switches.
	pub args: Vec<String>,
	/// Interval between condition-wait polls.
	pub poll_interval: Duration,
	/// Deadline for a single DevTools request.
	///
	/// An awaited framework settle stays in flight for the whole readiness
	/// budget, so this must exceed the largest budget in use.
	pub request_timeout: Duration,
}

/// Headroom added on top of the readiness budget for DevTools requests.
pub const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Request deadline that outlives any wait bounded by `budget`.
pub fn request_timeout_for(budget: Budget) -> Duration {
	budget.as_duration().saturating_add(REQUEST_TIMEOUT_MARGIN)
}

impl LaunchOptions {
	/// Headless options whose polling and request deadlines follow `config`.
	pub fn for_config(config: &ReadinessConfig) -> Self {
		Self {
			headless: true,
			executable: None,
			args: Vec::new(),
			poll_interval: config.poll_interval().as_duration(),
			request_timeout: request_timeout_for(config.total_budget()),
		}
	}

	fn browser_config(&self) -> Result<BrowserConfig> {
		let mut builder = BrowserConfig::builder().request_timeout(self.request_timeout);
		if !self.headless {
			builder = builder.with_head();
		}
		if let Some(executable) = &self.executable {
			builder = builder.chrome_executable(executable);
		}
		if !self.args.is_empty() {
			builder = builder.args(self.args.iter().map(String::as_str));
		}
		builder.build().map_err(Error::InvalidArgument)
	}
}

/// A launched Chromium instance.
///
/// The DevTools handler loop runs on a spawned task for the session's
/// lifetime. Call [`close`](Self::close) to shut the browser down.
pub struct ChromiumSession {
	browser: Browser,
	events: Arc<ChromiumBrowser>,
	handler: JoinHandle<()>,
	poll_interval: Duration,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self::for_config(&ReadinessConfig::default())
	}
}

impl ChromiumSession {
	/// Launches Chromium with `options`.
	pub async fn launch(options: LaunchOptions) -> Result<Self> {
		let config = options.browser_config()?;
		let (browser, mut handler) = Browser::launch(config)
			.await
			.map_err(|err| Error::Protocol(format!("failed to launch chromium: {err}")))?;

		let handler = tokio::spawn(async move {
			while let Some(event) = handler.next().await {
				if let Err(err) = event {
					tracing::debug!(target: "ngsync", namespace = "ngsync:runtime", error = %err, "devtools handler error");
				}
			}
		});

		let events = match ChromiumBrowser::attach(&browser).await {
			Ok(events) => Arc::new(events),
			Err(err) => {
				handler.abort();
				return Err(err);
			}
		};
		tracing::info!(target: "ngsync", namespace = "ngsync:runtime", headless = options.headless, "chromium launched");

		Ok(Self {
			browser,
			events,
			handler,
			poll_interval: options.poll_interval,
		})
	}

	/// Opens a new tab at `url`.
	pub async fn new_page(&self, url: &str) -> Result<ChromiumPage> {
		let page = self.browser.new_page(url).await.map_err(from_cdp)?;
		Ok(ChromiumPage::new(page, Arc::clone(&self.events), self.poll_interval))
	}

	/// Returns the browser-level event source.
	pub fn browser(&self) -> Arc<ChromiumBrowser> {
		Arc::clone(&self.events)
	}

	/// Closes the browser and stops the handler loop.
	pub async fn close(mut self) -> Result<()> {
		let closed = self.browser.close().await.map_err(from_cdp);
		if let Err(err) = self.browser.wait().await {
			tracing::debug!(target: "ngsync", namespace = "ngsync:runtime", error = %err, "waiting for chromium exit");
		}
		self.handler.abort();
		closed.map(|_| ())
	}
}

impl std::fmt::Debug for ChromiumSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChromiumSession")
			.field("events", &self.events)
			.field("poll_interval", &self.poll_interval)
			.finish_non_exhaustive()
	}
}
