//! Bounded-time race between an operation and its timeout fallback.
//!
//! [`until_settled_or_timed_out`] runs an *executor* and arms a timer for the
//! budget. Whichever of {executor settles, timer fires} comes first decides the
//! result; the other side becomes a no-op. The executor receives a
//! [`Liveness`] view so in-flight continuations can skip side effects once the
//! timer has fired.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::budget::Budget;
use crate::error::{Error, Result};

/// Which side of a race produced the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome<T> {
	/// Settled by the executor before the budget elapsed.
	Settled(T),
	/// Settled by the timeout executor.
	TimedOut(T),
}

impl<T> RaceOutcome<T> {
	/// Returns the value regardless of which side produced it.
	pub fn into_inner(self) -> T {
		match self {
			Self::Settled(value) | Self::TimedOut(value) => value,
		}
	}

	/// Returns a reference to the value.
	pub fn value(&self) -> &T {
		match self {
			Self::Settled(value) | Self::TimedOut(value) => value,
		}
	}

	/// Returns true if the timeout executor produced the result.
	pub fn is_timed_out(&self) -> bool {
		matches!(self, Self::TimedOut(_))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
	Executor,
	Timeout,
}

type Slot<T> = Arc<Mutex<Option<oneshot::Sender<Result<RaceOutcome<T>>>>>>;

/// Resolve/reject handle for one side of a race.
///
/// All settlers of a race share one slot: the first `resolve`/`reject` across
/// all of them wins, later calls return `false` and have no effect.
pub struct Settler<T> {
	slot: Slot<T>,
	side: Side,
}

impl<T> Clone for Settler<T> {
	fn clone(&self) -> Self {
		Self {
			slot: Arc::clone(&self.slot),
			side: self.side,
		}
	}
}

impl<T> Settler<T> {
	/// Settles the race with `value`. Returns `false` if it was already settled.
	pub fn resolve(&self, value: T) -> bool {
		let outcome = match self.side {
			Side::Executor => RaceOutcome::Settled(value),
			Side::Timeout => RaceOutcome::TimedOut(value),
		};
		self.settle(Ok(outcome))
	}

	/// Fails the race with `error`. Returns `false` if it was already settled.
	pub fn reject(&self, error: Error) -> bool {
		self.settle(Err(error))
	}

	/// Returns true once any side has settled the race.
	pub fn is_settled(&self) -> bool {
		self.slot.lock().is_none()
	}

	fn settle(&self, result: Result<RaceOutcome<T>>) -> bool {
		let Some(tx) = self.slot.lock().take() else {
			return false;
		};
		tx.send(result).is_ok()
	}
}

impl<T> std::fmt::Debug for Settler<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Settler")
			.field("side", &self.side)
			.field("settled", &self.is_settled())
			.finish()
	}
}

/// Read-only view of a race's pending flag.
///
/// `true` until the race's timer fires, `false` from then on. Cooperative only:
/// nothing already dispatched is undone when it flips.
#[derive(Debug, Clone)]
pub struct Liveness {
	pending: Arc<AtomicBool>,
}

impl Liveness {
	/// Returns true while the timer has not fired.
	pub fn is_pending(&self) -> bool {
		self.pending.load(Ordering::Acquire)
	}
}

/// Runs `executor` against a timer of `budget`.
///
/// `executor` is called immediately with the executor-side [`Settler`] and a
/// [`Liveness`] view; the future it returns is driven until the race settles or
/// the future completes. When the budget elapses first, the pending flag flips
/// to `false` and `on_timeout` is called with the timeout-side [`Settler`].
///
/// The timer lives inside this future and is dropped on return, so nothing
/// outlives the call. A zero budget fires `on_timeout` after the executor's
/// first poll.
///
/// # Errors
///
/// Returns the error passed to [`Settler::reject`], or [`Error::Abandoned`] if
/// every settler was dropped without settling.
pub async fn until_settled_or_timed_out<T, E, Fut, TE>(executor: E, on_timeout: TE, budget: Budget) -> Result<RaceOutcome<T>>
where
	E: FnOnce(Settler<T>, Liveness) -> Fut,
	Fut: Future<Output = ()>,
	TE: FnOnce(Settler<T>),
{
	let (tx, mut rx) = oneshot::channel();
	let slot: Slot<T> = Arc::new(Mutex::new(Some(tx)));
	let pending = Arc::new(AtomicBool::new(true));

	let timer = tokio::time::sleep(budget.as_duration());
	tokio::pin!(timer);

	let mut on_timeout = Some((
		on_timeout,
		Settler {
			slot: Arc::clone(&slot),
			side: Side::Timeout,
		},
	));

	let work = executor(
		Settler {
			slot,
			side: Side::Executor,
		},
		Liveness {
			pending: Arc::clone(&pending),
		},
	);
	tokio::pin!(work);
	let mut work_done = false;

	loop {
		tokio::select! {
			biased;

			settled = &mut rx => {
				return settled.unwrap_or_else(|_| Err(Error::Abandoned));
			}
			() = &mut work, if !work_done => {
				work_done = true;
			}
			() = &mut timer, if on_timeout.is_some() => {
				pending.store(false, Ordering::Release);
				if let Some((fire, settler)) = on_timeout.take() {
					fire(settler);
				}
			}
		}
	}
}
