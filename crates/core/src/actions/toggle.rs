//! Checkbox and select-option helpers.

use ngsync_protocol::scripts;
use serde_json::Value;

use super::ReadyPage;
use crate::logger::Logger;
use crate::page::is_truthy;

const LOG: Logger = Logger::new("ngsync:toggle");

impl ReadyPage<'_> {
	/// Checks a checkbox or radio button.
	pub async fn check(&self, selector: &str, label: &str) -> bool {
		self.toggle_checkbox(selector, label, true).await
	}

	/// Unchecks a checkbox or radio button.
	pub async fn uncheck(&self, selector: &str, label: &str) -> bool {
		self.toggle_checkbox(selector, label, false).await
	}

	/// Selects the options of `selector` whose text is one of `values`.
	pub async fn select_by_text(&self, selector: &str, values: &[String], label: &str) -> bool {
		self.toggle_select(selector, values, label, true).await
	}

	/// Deselects the options of `selector` whose text is one of `values`.
	pub async fn deselect_by_text(&self, selector: &str, values: &[String], label: &str) -> bool {
		self.toggle_select(selector, values, label, false).await
	}

	async fn toggle_checkbox(&self, selector: &str, label: &str, checked: bool) -> bool {
		let args = vec![Value::from(selector), Value::from(checked)];
		let toggled = match self.page.evaluate(&scripts::TOGGLE_CHECKBOX, args).await {
			Ok(value) => is_truthy(&value),
			Err(err) => LOG.debug_and_return(false, format_args!("toggle.checkbox {selector} for {label} error"), &err),
		};

		if toggled {
			let prefix = if checked { "" } else { "un" };
			LOG.debug(format_args!("{selector} is {prefix}checked for {label}"));
		} else {
			LOG.debug(format_args!("{selector} for {label} not found"));
		}
		toggled
	}

	async fn toggle_select(&self, selector: &str, values: &[String], label: &str, selected: bool) -> bool {
		let texts = Value::Array(values.iter().map(|text| Value::from(text.as_str())).collect());
		let args = vec![Value::from(selector), texts, Value::from(selected)];
		let toggled = match self.page.evaluate(&scripts::TOGGLE_SELECT, args).await {
			Ok(value) => is_truthy(&value),
			Err(err) => LOG.debug_and_return(false, format_args!("toggle.select {selector} for {label} error"), &err),
		};

		if toggled {
			let prefix = if selected { "" } else { "de" };
			LOG.debug(format_args!("{} to {prefix}selected on {selector} for {label}", values.join(", ")));
		} else {
			LOG.debug(format_args!("{selector} for {label} not found"));
		}
		toggled
	}
}
