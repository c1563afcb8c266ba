//! Readiness configuration.

use std::fs;
use std::path::Path;

use ngsync_protocol::{BOOTSTRAP_MARKERS, DocumentState};
use serde::{Deserialize, Serialize};

use crate::budget::{Budget, DEFAULT_BUDGET_MS};
use crate::error::Result;

/// Default interval between condition-wait polls, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Tunables for the readiness engine.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadinessConfig {
	/// Total budget for an action-readiness wait.
	pub total_budget_ms: u64,
	/// Document states that count as ready.
	pub document_states: Vec<DocumentState>,
	/// Selectors locating the framework's bootstrap root, in priority order.
	pub markers: Vec<String>,
	/// Interval between condition-wait polls for polling backends.
	pub poll_interval_ms: u64,
}

impl Default for ReadinessConfig {
	fn default() -> Self {
		Self {
			total_budget_ms: DEFAULT_BUDGET_MS,
			document_states: vec![DocumentState::Interactive, DocumentState::Complete],
			markers: BOOTSTRAP_MARKERS.iter().map(|m| m.to_string()).collect(),
			poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
		}
	}
}

impl ReadinessConfig {
	/// Loads a JSON config file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let content = fs::read_to_string(path)?;
		Ok(serde_json::from_str(&content)?)
	}

	/// Returns the total action-readiness budget.
	pub fn total_budget(&self) -> Budget {
		Budget::from_millis(self.total_budget_ms)
	}

	/// Returns the poll interval as a [`Budget`].
	pub fn poll_interval(&self) -> Budget {
		Budget::from_millis(self.poll_interval_ms)
	}
}
