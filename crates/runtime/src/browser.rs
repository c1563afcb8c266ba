//! Browser-level target events from Chromium.

use std::sync::Arc;

use chromiumoxide::Browser;
use chromiumoxide::cdp::IntoEventKind;
use chromiumoxide::cdp::browser_protocol::target::{EventTargetCreated, EventTargetInfoChanged, TargetInfo as CdpTargetInfo};
use chromiumoxide::listeners::EventStream;
use futures_util::StreamExt;
use ngsync::{BrowserHandle, Listener, Result, Subscription, TargetEvents, TargetId, TargetInfo, TargetTopic};
use tokio::task::JoinHandle;

use crate::error::from_cdp;

/// [`BrowserHandle`] fed by `Target.targetCreated` and `Target.targetInfoChanged`.
///
/// Each event kind is pumped by its own task; both are aborted on drop.
pub struct ChromiumBrowser {
	events: Arc<TargetEvents>,
	pumps: Vec<JoinHandle<()>>,
}

impl ChromiumBrowser {
	/// Subscribes to `browser`'s target events.
	pub async fn attach(browser: &Browser) -> Result<Self> {
		let events = Arc::new(TargetEvents::new());
		let created = browser.event_listener::<EventTargetCreated>().await.map_err(from_cdp)?;
		let changed = browser
			.event_listener::<EventTargetInfoChanged>()
			.await
			.map_err(from_cdp)?;

		let pumps = vec![
			spawn_pump(created, TargetTopic::Created, Arc::clone(&events), |event| {
				convert(&event.target_info)
			}),
			spawn_pump(changed, TargetTopic::Changed, Arc::clone(&events), |event| {
				convert(&event.target_info)
			}),
		];
		Ok(Self { events, pumps })
	}

	/// Returns the event hub.
	pub fn events(&self) -> Arc<TargetEvents> {
		Arc::clone(&self.events)
	}
}

impl BrowserHandle for ChromiumBrowser {
	fn subscribe(&self, topic: TargetTopic, listener: Listener<TargetInfo>) -> Subscription {
		self.events.subscribe(topic, listener)
	}
}

impl Drop for ChromiumBrowser {
	fn drop(&mut self) {
		for pump in &self.pumps {
			pump.abort();
		}
	}
}

impl std::fmt::Debug for ChromiumBrowser {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChromiumBrowser")
			.field("events", &self.events)
			.field("pumps", &self.pumps.len())
			.finish()
	}
}

fn convert(info: &CdpTargetInfo) -> TargetInfo {
	TargetInfo {
		target_id: TargetId::new(info.target_id.as_ref()),
		kind: info.r#type.clone(),
		url: info.url.clone(),
	}
}

fn spawn_pump<T, F>(mut stream: EventStream<T>, topic: TargetTopic, events: Arc<TargetEvents>, info: F) -> JoinHandle<()>
where
	T: IntoEventKind + Unpin + Send + Sync + 'static,
	F: Fn(&T) -> TargetInfo + Send + 'static,
{
	tokio::spawn(async move {
		while let Some(event) = stream.next().await {
			events.emit(topic, &info(&*event));
		}
		tracing::debug!(target: "ngsync", namespace = "ngsync:runtime", topic = %topic, "target event stream ended");
	})
}
