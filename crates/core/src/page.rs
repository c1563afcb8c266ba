//! Page and browser capabilities consumed by the readiness engine.
//!
//! Backends (a real browser, or [`MockPage`](crate::testing::MockPage) in tests)
//! implement [`PageHandle`] and [`BrowserHandle`]; nothing in this crate talks to
//! a browser directly.

use std::sync::Arc;

use async_trait::async_trait;
use ngsync_protocol::PageScript;
use serde_json::Value;

use crate::budget::Budget;
use crate::error::Result;
use crate::handlers::{Listener, Subscription};

/// Opaque identity of a navigable target (page, popup, frame).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(Arc<str>);

impl TargetId {
	/// Creates a target identity.
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(Arc::from(id.as_ref()))
	}

	/// Returns the identity as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for TargetId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for TargetId {
	fn from(id: String) -> Self {
		Self(Arc::from(id))
	}
}

impl std::fmt::Display for TargetId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Target lifecycle snapshot delivered to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo {
	/// Identity of the target the event is about.
	pub target_id: TargetId,
	/// Target type (`page`, `iframe`, `service_worker`, ...).
	pub kind: String,
	/// Current URL of the target.
	pub url: String,
}

impl TargetInfo {
	/// Creates a `page` target snapshot.
	pub fn page(target_id: impl Into<TargetId>, url: impl Into<String>) -> Self {
		Self {
			target_id: target_id.into(),
			kind: "page".to_string(),
			url: url.into(),
		}
	}
}

/// Browser-level target lifecycle topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTopic {
	/// A target was created (or re-announced).
	Created,
	/// A target's info changed (navigation, attach).
	Changed,
}

impl TargetTopic {
	/// All topics, in subscription order.
	pub const ALL: [TargetTopic; 2] = [TargetTopic::Created, TargetTopic::Changed];

	/// Returns the topic name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Created => "targetcreated",
			Self::Changed => "targetchanged",
		}
	}
}

impl std::fmt::Display for TargetTopic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Browser-level event source shared by every page of a session.
///
/// Outlives any single wait; listeners must be released through the returned
/// [`Subscription`].
pub trait BrowserHandle: Send + Sync {
	/// Registers `listener` for `topic`.
	fn subscribe(&self, topic: TargetTopic, listener: Listener<TargetInfo>) -> Subscription;
}

/// Page operations the readiness engine and action helpers rely on.
#[async_trait]
pub trait PageHandle: Send + Sync {
	/// Returns the identity of this page's own navigation target.
	fn target_id(&self) -> TargetId;

	/// Returns the browser this page belongs to.
	fn browser(&self) -> Arc<dyn BrowserHandle>;

	/// Runs `script` in the page with JSON `args` and returns its (awaited) result.
	async fn evaluate(&self, script: &PageScript, args: Vec<Value>) -> Result<Value>;

	/// Re-evaluates `script` until it returns a truthy value.
	///
	/// # Errors
	///
	/// Must fail with [`Error::Timeout`](crate::Error::Timeout) once `timeout`
	/// elapses; other variants report evaluation failures.
	async fn wait_for_function(&self, script: &PageScript, args: Vec<Value>, timeout: Budget) -> Result<Value>;

	/// Navigates to `url`.
	async fn goto(&self, url: &str) -> Result<()>;
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}
