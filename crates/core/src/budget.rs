//! Time budgets for waits.

use std::time::Duration;

/// Default total budget for readiness waits, in milliseconds.
pub const DEFAULT_BUDGET_MS: u64 = 25_000;

/// Immutable, non-negative wait budget in milliseconds.
///
/// Sub-budgets are fixed proportions of a parent ([`share`](Self::share)) and
/// never exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Budget {
	millis: u64,
}

impl Budget {
	/// Zero budget; waits bounded by it time out immediately.
	pub const ZERO: Budget = Budget { millis: 0 };

	/// Creates a budget of `millis` milliseconds.
	pub const fn from_millis(millis: u64) -> Self {
		Self { millis }
	}

	/// Returns the budget in milliseconds.
	pub const fn as_millis(&self) -> u64 {
		self.millis
	}

	/// Returns the budget as a [`Duration`].
	pub const fn as_duration(&self) -> Duration {
		Duration::from_millis(self.millis)
	}

	/// Returns `ceil(self * numerator / denominator)`, capped at `self`.
	///
	/// A zero denominator yields the full budget.
	pub fn share(&self, numerator: u64, denominator: u64) -> Budget {
		if denominator == 0 {
			return *self;
		}
		let scaled = (self.millis as u128 * numerator as u128).div_ceil(denominator as u128);
		Budget::from_millis(scaled.min(self.millis as u128) as u64)
	}
}

impl Default for Budget {
	fn default() -> Self {
		Self::from_millis(DEFAULT_BUDGET_MS)
	}
}

impl From<Duration> for Budget {
	fn from(duration: Duration) -> Self {
		Self::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
	}
}

impl std::fmt::Display for Budget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}ms", self.millis)
	}
}
