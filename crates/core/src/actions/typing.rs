//! Text entry helper.

use ngsync_protocol::{TypeOutcome, scripts};
use serde_json::Value;

use super::ReadyPage;
use crate::error::Error;
use crate::logger::Logger;

const LOG: Logger = Logger::new("ngsync:type");

impl ReadyPage<'_> {
	/// Sets the value of `selector` and fires `input`, `change` and `focusout`.
	///
	/// Password fields are logged with the value masked. Returns `true` if the
	/// element existed.
	pub async fn type_if_exists(&self, selector: &str, value: &str, label: &str) -> bool {
		let args = vec![Value::from(selector), Value::from(value)];
		let outcome = match self.page.evaluate(&scripts::TYPE_TEXT, args).await {
			Ok(raw) => serde_json::from_value::<TypeOutcome>(raw).map_err(Error::from),
			Err(err) => Err(err),
		};
		let outcome = match outcome {
			Ok(outcome) => outcome,
			Err(err) => {
				LOG.debug_error(format_args!("type {selector} for {label} error"), &err);
				TypeOutcome::default()
			}
		};

		if outcome.applied {
			let display = if outcome.masked {
				"*".repeat(value.chars().count())
			} else {
				value.to_string()
			};
			LOG.debug(format_args!("{display} on {selector} for {label}"));
		} else {
			LOG.debug(format_args!("{selector} for {label} not found"));
		}
		outcome.applied
	}
}
