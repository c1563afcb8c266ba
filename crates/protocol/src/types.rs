//! Values exchanged with in-page routines.

use serde::{Deserialize, Serialize};

/// Bootstrap markers locating the framework's injector root, in lookup order:
/// data-attribute form, plain-attribute form, CSS-class form.
pub const BOOTSTRAP_MARKERS: [&str; 3] = ["[data-ng-app]", "[ng-app]", ".ng-scope"];

/// `document.readyState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
	/// The document is still loading.
	Loading,
	/// Parsed; sub-resources may still be loading.
	Interactive,
	/// Fully loaded.
	Complete,
}

impl DocumentState {
	/// Returns the wire string.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Loading => "loading",
			Self::Interactive => "interactive",
			Self::Complete => "complete",
		}
	}
}

impl std::fmt::Display for DocumentState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Result of the framework presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameworkProbe {
	/// Whether the framework global exists on the page.
	pub present: bool,
}

/// Argument of the framework settle routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkSettleArgs {
	/// In-page timer budget.
	pub budget_ms: u64,
	/// Bootstrap marker selectors, checked in order.
	pub markers: Vec<String>,
}

/// Result of the framework settle routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameworkSettle {
	/// Whether the framework global was present when the routine ran.
	pub present: bool,
	/// `true` once the framework reported no outstanding requests, `false` if the
	/// in-page timer fired first.
	pub settled: bool,
}

/// Result of the type-text routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeOutcome {
	/// Whether an element matched and received the value.
	pub applied: bool,
	/// Whether the element is a password field (value must not be logged).
	pub masked: bool,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn document_state_serializes_lowercase() {
		let states = vec![DocumentState::Interactive, DocumentState::Complete];
		assert_eq!(serde_json::to_value(&states).unwrap(), json!(["interactive", "complete"]));
	}

	#[test]
	fn settle_args_use_camel_case() {
		let args = FrameworkSettleArgs {
			budget_ms: 250,
			markers: vec![".ng-scope".into()],
		};
		assert_eq!(serde_json::to_value(&args).unwrap(), json!({"budgetMs": 250, "markers": [".ng-scope"]}));
	}

	#[test]
	fn framework_settle_from_page_result() {
		let settle: FrameworkSettle = serde_json::from_value(json!({"present": true, "settled": false})).unwrap();
		assert!(settle.present);
		assert!(!settle.settled);
	}
}
