//! In-process hub for browser-level target lifecycle events.
//!
//! Backends feed CDP target events into [`TargetEvents::emit`]; waiters register
//! through the [`BrowserHandle`] impl. Each topic keeps its own handler map and
//! counters of listeners added and removed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::handlers::{HandlerId, HandlerMap, Listener, Subscription, handler_map, next_handler_id, snapshot};
use crate::page::{BrowserHandle, TargetInfo, TargetTopic};

#[derive(Debug, Default)]
struct TopicCounters {
	added: AtomicU64,
	removed: AtomicU64,
}

/// Listener bookkeeping for one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopicStats {
	/// Listeners ever registered.
	pub added: u64,
	/// Unsubscribe calls (each [`Subscription`] counts once).
	pub removed: u64,
	/// Listeners currently registered.
	pub active: usize,
}

/// Target lifecycle event hub implementing [`BrowserHandle`].
pub struct TargetEvents {
	created: HandlerMap<TargetInfo>,
	changed: HandlerMap<TargetInfo>,
	counters: Arc<[TopicCounters; 2]>,
}

impl TargetEvents {
	/// Creates a hub with no listeners.
	pub fn new() -> Self {
		Self {
			created: handler_map(),
			changed: handler_map(),
			counters: Arc::new([TopicCounters::default(), TopicCounters::default()]),
		}
	}

	fn handlers(&self, topic: TargetTopic) -> &HandlerMap<TargetInfo> {
		match topic {
			TargetTopic::Created => &self.created,
			TargetTopic::Changed => &self.changed,
		}
	}

	fn counter_index(topic: TargetTopic) -> usize {
		match topic {
			TargetTopic::Created => 0,
			TargetTopic::Changed => 1,
		}
	}

	/// Delivers `info` to every listener of `topic`.
	///
	/// Listeners run outside the map lock and may unsubscribe during delivery.
	pub fn emit(&self, topic: TargetTopic, info: &TargetInfo) {
		let listeners = snapshot(self.handlers(topic));
		tracing::trace!(topic = %topic, target = %info.target_id, listeners = listeners.len(), "target event");
		for listener in listeners {
			listener(info);
		}
	}

	/// Returns the number of listeners currently registered for `topic`.
	pub fn listener_count(&self, topic: TargetTopic) -> usize {
		self.handlers(topic).lock().len()
	}

	/// Returns listener bookkeeping for `topic`.
	pub fn stats(&self, topic: TargetTopic) -> TopicStats {
		let counters = &self.counters[Self::counter_index(topic)];
		TopicStats {
			added: counters.added.load(Ordering::SeqCst),
			removed: counters.removed.load(Ordering::SeqCst),
			active: self.listener_count(topic),
		}
	}
}

impl Default for TargetEvents {
	fn default() -> Self {
		Self::new()
	}
}

impl BrowserHandle for TargetEvents {
	fn subscribe(&self, topic: TargetTopic, listener: Listener<TargetInfo>) -> Subscription {
		let handlers = self.handlers(topic);
		let id = next_handler_id();
		handlers.lock().insert(id, listener);

		let index = Self::counter_index(topic);
		self.counters[index].added.fetch_add(1, Ordering::SeqCst);

		let counters = Arc::clone(&self.counters);
		let registration = Mutex::new(Some(Subscription::from_handler_map(id, handlers)));
		Subscription::new(
			id,
			Arc::new(move |_id: HandlerId| {
				counters[index].removed.fetch_add(1, Ordering::SeqCst);
				let inner = registration.lock().take();
				drop(inner);
			}),
		)
	}
}

impl std::fmt::Debug for TargetEvents {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TargetEvents")
			.field("created", &self.stats(TargetTopic::Created))
			.field("changed", &self.stats(TargetTopic::Changed))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::AtomicUsize;

	use super::*;

	fn counting_listener(hits: &Arc<AtomicUsize>) -> Listener<TargetInfo> {
		let hits = Arc::clone(hits);
		Arc::new(move |_: &TargetInfo| {
			hits.fetch_add(1, Ordering::SeqCst);
		})
	}

	#[test]
	fn emit_reaches_only_the_topic_listeners() {
		let events = TargetEvents::new();
		let created = Arc::new(AtomicUsize::new(0));
		let changed = Arc::new(AtomicUsize::new(0));
		let _a = events.subscribe(TargetTopic::Created, counting_listener(&created));
		let _b = events.subscribe(TargetTopic::Changed, counting_listener(&changed));

		events.emit(TargetTopic::Changed, &TargetInfo::page("T1", "about:blank"));

		assert_eq!(created.load(Ordering::SeqCst), 0);
		assert_eq!(changed.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn dropping_subscription_removes_listener_once() {
		let events = TargetEvents::new();
		let hits = Arc::new(AtomicUsize::new(0));
		let sub = events.subscribe(TargetTopic::Created, counting_listener(&hits));
		assert_eq!(events.listener_count(TargetTopic::Created), 1);

		drop(sub);
		events.emit(TargetTopic::Created, &TargetInfo::page("T1", "about:blank"));

		assert_eq!(hits.load(Ordering::SeqCst), 0);
		assert_eq!(
			events.stats(TargetTopic::Created),
			TopicStats {
				added: 1,
				removed: 1,
				active: 0
			}
		);
	}

	#[test]
	fn listener_may_unsubscribe_during_emit() {
		let events = TargetEvents::new();
		let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
		let own = Arc::clone(&slot);
		let sub = events.subscribe(
			TargetTopic::Changed,
			Arc::new(move |_: &TargetInfo| {
				let taken = own.lock().take();
				drop(taken);
			}),
		);
		*slot.lock() = Some(sub);

		events.emit(TargetTopic::Changed, &TargetInfo::page("T1", "about:blank"));
		events.emit(TargetTopic::Changed, &TargetInfo::page("T1", "about:blank"));

		assert_eq!(events.stats(TargetTopic::Changed).removed, 1);
		assert_eq!(events.listener_count(TargetTopic::Changed), 0);
	}
}
