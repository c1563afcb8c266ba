use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::LOG;
use crate::budget::Budget;
use crate::handlers::{Listener, Subscription};
use crate::page::{PageHandle, TargetInfo, TargetTopic};
use crate::race::until_settled_or_timed_out;

type Registrations = Arc<Mutex<Vec<Subscription>>>;

/// Owns the per-wait target listeners and releases them on every exit path.
struct ListenerGuard {
	registrations: Registrations,
}

impl ListenerGuard {
	fn new() -> Self {
		Self {
			registrations: Arc::new(Mutex::new(Vec::with_capacity(TargetTopic::ALL.len()))),
		}
	}

	fn push(&self, subscription: Subscription) {
		self.registrations.lock().push(subscription);
	}

	fn downgrade(&self) -> Weak<Mutex<Vec<Subscription>>> {
		Arc::downgrade(&self.registrations)
	}

	fn release(&self) {
		release(&self.registrations);
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		self.release();
	}
}

// Subscriptions are dropped after the lock is released; their droppers take
// the event source's own lock.
fn release(registrations: &Mutex<Vec<Subscription>>) {
	let taken = std::mem::take(&mut *registrations.lock());
	drop(taken);
}

/// Waits until the page's own target is announced by a `targetcreated` or
/// `targetchanged` event.
///
/// Returns `true` if a matching event arrived within `budget`, `false`
/// otherwise. Both listeners are removed exactly once whichever way the wait
/// ends.
pub async fn until_target_ready(page: &dyn PageHandle, budget: Budget) -> bool {
	let target_id = page.target_id();
	let browser = page.browser();
	let guard = ListenerGuard::new();
	let attached = Arc::new(AtomicBool::new(false));

	let outcome = until_settled_or_timed_out(
		|settle, liveness| {
			let registrations = guard.downgrade();
			let seen = Arc::clone(&attached);
			let listener: Listener<TargetInfo> = Arc::new(move |info: &TargetInfo| {
				if !liveness.is_pending() || info.target_id != target_id {
					return;
				}
				seen.store(true, Ordering::SeqCst);
				if let Some(registrations) = registrations.upgrade() {
					release(&registrations);
				}
				settle.resolve(true);
			});
			for topic in TargetTopic::ALL {
				guard.push(browser.subscribe(topic, Arc::clone(&listener)));
			}
			std::future::ready(())
		},
		|settle| {
			guard.release();
			settle.resolve(attached.load(Ordering::SeqCst));
		},
		budget,
	)
	.await;

	match outcome {
		Ok(outcome) => outcome.into_inner(),
		Err(err) => LOG.debug_and_return(false, "target readiness", &err),
	}
}
