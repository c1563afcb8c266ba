//! Generic listener infrastructure.
//!
//! Listeners live in a [`HandlerMap<E>`] ([`IndexMap`] storage for O(1) removal
//! and stable insertion order) and are removed through an RAII [`Subscription`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::Mutex;

/// Unique identifier for listeners.
pub type HandlerId = u64;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a new globally-unique handler ID.
pub fn next_handler_id() -> HandlerId {
	NEXT_HANDLER_ID.fetch_add(1, Ordering::SeqCst)
}

/// Listener callback: receives each event by reference.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Listener storage keyed by [`HandlerId`].
pub type HandlerMap<E> = Arc<Mutex<IndexMap<HandlerId, Listener<E>>>>;

/// Creates an empty [`HandlerMap`].
pub fn handler_map<E>() -> HandlerMap<E> {
	Arc::new(Mutex::new(IndexMap::new()))
}

/// Returns the listeners currently registered, in insertion order.
///
/// Callers invoke the snapshot after the lock is released, so a listener may
/// unsubscribe itself while running.
pub fn snapshot<E>(handlers: &HandlerMap<E>) -> Vec<Listener<E>> {
	handlers.lock().values().cloned().collect()
}

/// RAII handle that unregisters a listener on drop.
///
/// The dropper runs at most once, whether through [`unsubscribe`](Self::unsubscribe)
/// or drop. Subscriptions built by [`from_handler_map`](Self::from_handler_map)
/// hold a weak reference, so dropping after the owner is gone is a no-op.
pub struct Subscription {
	id: HandlerId,
	dropper: Option<Arc<dyn Fn(HandlerId) + Send + Sync>>,
}

impl Subscription {
	/// Creates a subscription with a custom dropper function.
	pub fn new(id: HandlerId, dropper: Arc<dyn Fn(HandlerId) + Send + Sync>) -> Self {
		Self { id, dropper: Some(dropper) }
	}

	/// Creates a subscription removing `id` from `handlers` through a weak reference.
	pub fn from_handler_map<E>(id: HandlerId, handlers: &HandlerMap<E>) -> Self
	where
		E: 'static,
	{
		let weak: Weak<Mutex<IndexMap<HandlerId, Listener<E>>>> = Arc::downgrade(handlers);
		let dropper = Arc::new(move |id: HandlerId| {
			if let Some(map) = weak.upgrade() {
				let removed = map.lock().shift_remove(&id);
				drop(removed);
			}
		});
		Self::new(id, dropper)
	}

	/// Returns this subscription's handler ID.
	pub fn id(&self) -> HandlerId {
		self.id
	}

	/// Returns true until the dropper has run.
	pub fn is_active(&self) -> bool {
		self.dropper.is_some()
	}

	/// Explicitly unsubscribes. Equivalent to dropping.
	pub fn unsubscribe(mut self) {
		self.release();
	}

	fn release(&mut self) {
		if let Some(dropper) = self.dropper.take() {
			(dropper)(self.id);
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release();
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("active", &self.is_active())
			.finish()
	}
}
