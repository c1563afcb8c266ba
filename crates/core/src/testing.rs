//! Scripted page double for exercising readiness waits without a browser.
//!
//! [`MockPage`] answers the in-page routines by name, shares a [`TargetEvents`]
//! hub as its browser, and records every call for assertions.
//!
//! # Example
//!
//! ```ignore
//! use ngsync::testing::{MockFramework, MockPage};
//!
//! #[tokio::test(start_paused = true)]
//! async fn framework_settles() {
//!     let page = MockPage::new("T1");
//!     page.set_framework(MockFramework::SettlesAfter(Duration::from_millis(10)));
//!     assert!(until_framework_ready(&page, Budget::from_millis(100), &markers).await);
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ngsync_protocol::{FrameworkSettle, PageScript, TypeOutcome, scripts};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::budget::Budget;
use crate::error::{Error, Result};
use crate::events::TargetEvents;
use crate::page::{BrowserHandle, PageHandle, TargetId, TargetInfo, TargetTopic};

/// Scripted `document.readyState` behavior.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MockDocument {
	/// The predicate holds immediately.
	#[default]
	Ready,
	/// The predicate never holds; condition-waits time out.
	Pending,
	/// Condition-waits fail with an evaluation error carrying this message.
	Fails(String),
}

/// Scripted framework behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockFramework {
	/// No framework global on the page.
	#[default]
	Absent,
	/// Outstanding requests drain after this long.
	SettlesAfter(Duration),
	/// Outstanding requests never drain.
	NeverSettles,
}

/// Call recorded by [`MockPage`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
	/// [`PageHandle::evaluate`].
	Evaluate { script: &'static str, args: Vec<Value> },
	/// [`PageHandle::wait_for_function`].
	WaitForFunction { script: &'static str, timeout_ms: u64 },
	/// [`PageHandle::goto`].
	Goto { url: String },
}

#[derive(Debug, Clone, Copy, Default)]
struct MockElement {
	password: bool,
}

/// In-memory [`PageHandle`] with scripted behavior.
pub struct MockPage {
	target: TargetId,
	events: Arc<TargetEvents>,
	document: Mutex<MockDocument>,
	framework: Mutex<MockFramework>,
	elements: Mutex<HashMap<String, MockElement>>,
	script_errors: Mutex<HashMap<&'static str, String>>,
	goto_error: Mutex<Option<String>>,
	calls: Mutex<Vec<MockCall>>,
}

impl MockPage {
	/// Creates a page with target `target_id`, a ready document and no framework.
	pub fn new(target_id: impl Into<TargetId>) -> Self {
		Self::with_events(target_id, Arc::new(TargetEvents::new()))
	}

	/// Creates a page sharing `events` as its browser.
	pub fn with_events(target_id: impl Into<TargetId>, events: Arc<TargetEvents>) -> Self {
		Self {
			target: target_id.into(),
			events,
			document: Mutex::new(MockDocument::default()),
			framework: Mutex::new(MockFramework::default()),
			elements: Mutex::new(HashMap::new()),
			script_errors: Mutex::new(HashMap::new()),
			goto_error: Mutex::new(None),
			calls: Mutex::new(Vec::new()),
		}
	}

	/// Returns the event hub acting as this page's browser.
	pub fn events(&self) -> Arc<TargetEvents> {
		Arc::clone(&self.events)
	}

	/// Emits `topic` for this page's own target.
	pub fn announce(&self, topic: TargetTopic) {
		self.events.emit(topic, &TargetInfo::page(self.target.clone(), "about:blank"));
	}

	pub fn set_document(&self, document: MockDocument) {
		*self.document.lock() = document;
	}

	pub fn set_framework(&self, framework: MockFramework) {
		*self.framework.lock() = framework;
	}

	/// Adds an element matching `selector`.
	pub fn add_element(&self, selector: &str) {
		self.elements.lock().insert(selector.to_string(), MockElement::default());
	}

	/// Adds a password input matching `selector`.
	pub fn add_password_field(&self, selector: &str) {
		self.elements
			.lock()
			.insert(selector.to_string(), MockElement { password: true });
	}

	/// Makes every evaluation of `script` fail with `message`.
	pub fn fail_script(&self, script: &PageScript, message: &str) {
		self.script_errors.lock().insert(script.name, message.to_string());
	}

	/// Makes navigation fail with `message`.
	pub fn fail_goto(&self, message: &str) {
		*self.goto_error.lock() = Some(message.to_string());
	}

	/// Returns every recorded call, in order.
	pub fn calls(&self) -> Vec<MockCall> {
		self.calls.lock().clone()
	}

	/// Returns the names of evaluated scripts, in order.
	pub fn evaluated(&self) -> Vec<&'static str> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				MockCall::Evaluate { script, .. } => Some(*script),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: MockCall) {
		self.calls.lock().push(call);
	}

	fn element(&self, args: &[Value]) -> Option<MockElement> {
		let selector = args.first().and_then(Value::as_str)?;
		self.elements.lock().get(selector).copied()
	}

	async fn settle_framework(&self, args: &[Value]) -> Value {
		let budget = args
			.first()
			.and_then(|arg| arg.get("budgetMs"))
			.and_then(Value::as_u64)
			.map(Duration::from_millis)
			.unwrap_or(Duration::ZERO);

		let framework = *self.framework.lock();
		let settle = match framework {
			MockFramework::Absent => FrameworkSettle {
				present: false,
				settled: true,
			},
			MockFramework::SettlesAfter(delay) if delay <= budget => {
				tokio::time::sleep(delay).await;
				FrameworkSettle {
					present: true,
					settled: true,
				}
			}
			MockFramework::SettlesAfter(_) | MockFramework::NeverSettles => {
				tokio::time::sleep(budget).await;
				FrameworkSettle {
					present: true,
					settled: false,
				}
			}
		};
		json!(settle)
	}
}

#[async_trait]
impl PageHandle for MockPage {
	fn target_id(&self) -> TargetId {
		self.target.clone()
	}

	fn browser(&self) -> Arc<dyn BrowserHandle> {
		self.events.clone()
	}

	async fn evaluate(&self, script: &PageScript, args: Vec<Value>) -> Result<Value> {
		self.record(MockCall::Evaluate {
			script: script.name,
			args: args.clone(),
		});
		if let Some(message) = self.script_errors.lock().get(script.name).cloned() {
			return Err(Error::Evaluation(message));
		}

		let found = self.element(&args);
		let value = match script.name {
			name if name == scripts::FRAMEWORK_PROBE.name => {
				json!({ "present": *self.framework.lock() != MockFramework::Absent })
			}
			name if name == scripts::FRAMEWORK_SETTLE.name => self.settle_framework(&args).await,
			name if name == scripts::DOCUMENT_READY.name => json!(*self.document.lock() == MockDocument::Ready),
			name if name == scripts::TYPE_TEXT.name => serde_json::to_value(TypeOutcome {
				applied: found.is_some(),
				masked: found.is_some_and(|el| el.password),
			})?,
			name if name == scripts::ELEMENT_EXISTS.name
				|| name == scripts::CLICK.name
				|| name == scripts::TOGGLE_CHECKBOX.name
				|| name == scripts::TOGGLE_SELECT.name =>
			{
				json!(found.is_some())
			}
			other => return Err(Error::Evaluation(format!("no scripted behavior for {other}"))),
		};
		Ok(value)
	}

	async fn wait_for_function(&self, script: &PageScript, _args: Vec<Value>, timeout: Budget) -> Result<Value> {
		self.record(MockCall::WaitForFunction {
			script: script.name,
			timeout_ms: timeout.as_millis(),
		});
		if let Some(message) = self.script_errors.lock().get(script.name).cloned() {
			return Err(Error::Evaluation(message));
		}

		let document = self.document.lock().clone();
		match document {
			MockDocument::Ready => Ok(Value::Bool(true)),
			MockDocument::Pending => {
				tokio::time::sleep(timeout.as_duration()).await;
				Err(Error::Timeout(format!("{script} not satisfied within {timeout}")))
			}
			MockDocument::Fails(message) => Err(Error::Evaluation(message)),
		}
	}

	async fn goto(&self, url: &str) -> Result<()> {
		self.record(MockCall::Goto { url: url.to_string() });
		match self.goto_error.lock().clone() {
			Some(message) => Err(Error::Navigation {
				url: url.to_string(),
				message,
			}),
			None => Ok(()),
		}
	}
}

impl std::fmt::Debug for MockPage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockPage")
			.field("target", &self.target)
			.field("document", &*self.document.lock())
			.field("framework", &*self.framework.lock())
			.finish_non_exhaustive()
	}
}
