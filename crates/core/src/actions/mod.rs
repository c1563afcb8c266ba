//! DOM-action helpers synchronized with readiness waits.
//!
//! [`ReadyPage`] pairs a page with an [`ActionReadiness`] orchestrator. Every
//! helper reports success as `bool` and logs failures instead of returning them.

mod click;
mod form;
mod navigate;
mod toggle;
mod typing;

use serde_json::Value;

use crate::budget::Budget;
use crate::page::PageHandle;
use crate::wait::ActionReadiness;

pub use form::{FieldAction, FieldConfig, value_at};

/// A page handle bound to the readiness orchestrator used by its actions.
#[derive(Clone, Copy)]
pub struct ReadyPage<'a> {
	page: &'a dyn PageHandle,
	readiness: &'a ActionReadiness,
}

impl<'a> ReadyPage<'a> {
	pub fn new(page: &'a dyn PageHandle, readiness: &'a ActionReadiness) -> Self {
		Self { page, readiness }
	}

	/// Returns the underlying page.
	pub fn page(&self) -> &'a dyn PageHandle {
		self.page
	}

	/// Returns the orchestrator.
	pub fn readiness(&self) -> &'a ActionReadiness {
		self.readiness
	}

	/// See [`ActionReadiness::wait_until_action_ready`].
	pub async fn wait_until_action_ready(&self, total: Option<Budget>) {
		self.readiness.wait_until_action_ready(self.page, total).await;
	}

	/// See [`ActionReadiness::wait_until_framework_ready`].
	pub async fn wait_until_framework_ready(&self, budget: Option<Budget>) {
		self.readiness.wait_until_framework_ready(self.page, budget).await;
	}
}

impl std::fmt::Debug for ReadyPage<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReadyPage")
			.field("target", &self.page.target_id())
			.field("readiness", self.readiness)
			.finish()
	}
}

fn selector_arg(selector: &str) -> Vec<Value> {
	vec![Value::from(selector)]
}
