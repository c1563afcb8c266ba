//! Namespaced debug logging that drops negligible errors.
//!
//! A page that navigates away or closes mid-wait produces a predictable set of
//! failures (destroyed contexts, closed sessions). They are recognized by
//! message and never logged.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

static NEGLIGIBLE: LazyLock<Regex> = LazyLock::new(|| {
	let patterns = [
		"Cannot find context",
		"context was destroyed",
		"failed to find element",
		"pool is draining",
		"Resource not currently part of this pool",
		"Session closed",
		"Target closed",
	];
	Regex::new(&format!("(?i)({})", patterns.join("|"))).expect("negligible patterns are valid")
});

/// Returns true if `message` is one of the known-benign failure messages.
pub fn is_negligible(message: &str) -> bool {
	NEGLIGIBLE.is_match(message)
}

/// Debug logger bound to a namespace (`ngsync:wait`, `ngsync:click`, ...).
#[derive(Debug, Clone, Copy)]
pub struct Logger {
	namespace: &'static str,
}

impl Logger {
	/// Creates a logger for `namespace`.
	pub const fn new(namespace: &'static str) -> Self {
		Self { namespace }
	}

	/// Returns the namespace.
	pub fn namespace(&self) -> &'static str {
		self.namespace
	}

	/// Logs `message` at debug level.
	pub fn debug(&self, message: impl Display) {
		tracing::debug!(target: "ngsync", namespace = self.namespace, "{message}");
	}

	/// Logs `context` with `error` at debug level unless the error is negligible.
	///
	/// Returns true if a record was emitted.
	pub fn debug_error(&self, context: impl Display, error: &dyn std::error::Error) -> bool {
		let rendered = error.to_string();
		if is_negligible(&rendered) {
			return false;
		}
		tracing::debug!(target: "ngsync", namespace = self.namespace, error = %rendered, "{context}");
		true
	}

	/// Logs like [`debug_error`](Self::debug_error) and hands `value` back.
	pub fn debug_and_return<T>(&self, value: T, context: impl Display, error: &dyn std::error::Error) -> T {
		self.debug_error(context, error);
		value
	}
}
