//! Error types for readiness waiting and page actions.

use thiserror::Error;

/// Result type alias for page operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by page capabilities and the race primitive.
///
/// Readiness entry points never return these; they are classified, logged and
/// folded into a "not ready" signal.
#[derive(Debug, Error)]
pub enum Error {
	/// Condition-wait or evaluation ran out of time.
	#[error("Timeout: {0}")]
	Timeout(String),

	/// In-page evaluation threw or returned an unusable value.
	#[error("Evaluation failed: {0}")]
	Evaluation(String),

	/// Target was closed (browser, context, or page).
	#[error("Target closed: Cannot perform operation on closed {target_type}. {context}")]
	TargetClosed { target_type: String, context: String },

	/// Element not found by selector.
	#[error("Element not found: selector '{0}'")]
	ElementNotFound(String),

	/// Navigation failed.
	#[error("Navigation to '{url}' failed: {message}")]
	Navigation { url: String, message: String },

	/// Backend protocol error.
	#[error("Protocol error: {0}")]
	Protocol(String),

	/// Invalid argument provided to method.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// Every settler of a race was dropped without settling it.
	#[error("Race abandoned: no executor settled the result")]
	Abandoned,

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Returns true if this is a timeout error.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout(_))
	}

	/// Returns true if this is a target closed error.
	pub fn is_target_closed(&self) -> bool {
		matches!(self, Error::TargetClosed { .. })
	}
}
