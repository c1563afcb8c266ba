//! Declarative form filling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ReadyPage;
use crate::budget::Budget;
use crate::logger::Logger;

const LOG: Logger = Logger::new("ngsync:form");

/// Action applied to one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldAction {
	Check,
	Click,
	DeselectText,
	SelectText,
	Type,
	Uncheck,
	/// Unrecognized action; the field is skipped.
	#[serde(other)]
	Unknown,
}

impl FieldAction {
	fn default_label(&self) -> &'static str {
		match self {
			Self::Click => "click",
			Self::Type => "type",
			_ => "toggle",
		}
	}

	fn reads_value(&self) -> bool {
		matches!(self, Self::DeselectText | Self::SelectText | Self::Type)
	}
}

/// One entry of a form description.
///
/// ```json
/// { "label": "Email", "selector": "input.email", "type": "type", "value": "user.email" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
	/// Debug label; defaults per action.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	pub selector: String,
	#[serde(rename = "type")]
	pub action: FieldAction,
	/// JMESPath expression evaluated against the form data.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	/// Used when `value` resolves to nothing.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Value>,
	/// Readiness budget for `click` fields.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,
}

impl FieldConfig {
	fn label(&self) -> &str {
		self.label.as_deref().unwrap_or_else(|| self.action.default_label())
	}

	fn resolve(&self, data: &Value) -> Option<Value> {
		self.value
			.as_deref()
			.and_then(|expression| value_at(data, expression))
			.or_else(|| self.default_value.clone().filter(|value| !value.is_null()))
	}
}

/// Evaluates the JMESPath `expression` against `data`.
///
/// Returns `None` for empty or invalid expressions and for `null` results.
pub fn value_at(data: &Value, expression: &str) -> Option<Value> {
	let expression = expression.trim();
	if expression.is_empty() {
		return None;
	}
	let compiled = match jmespath::compile(expression) {
		Ok(compiled) => compiled,
		Err(err) => {
			LOG.debug(format_args!("invalid value expression {expression:?}: {err}"));
			return None;
		}
	};
	let found = match compiled.search(data) {
		Ok(found) => found,
		Err(err) => {
			LOG.debug(format_args!("{expression:?} could not be evaluated: {err}"));
			return None;
		}
	};
	if found.is_null() {
		return None;
	}
	serde_json::to_value(&*found).ok()
}

fn as_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

fn as_texts(value: &Value) -> Vec<String> {
	match value {
		Value::Array(items) => items.iter().map(as_text).collect(),
		Value::Null => Vec::new(),
		other => vec![as_text(other)],
	}
}

impl ReadyPage<'_> {
	/// Applies `fields` in order against `data`.
	///
	/// Returns one result per field. A field that fails or targets a missing
	/// element yields `false` and the remaining fields still run.
	pub async fn fill_out(&self, fields: &[FieldConfig], data: &Value) -> Vec<bool> {
		let mut results = Vec::with_capacity(fields.len());
		for field in fields {
			results.push(self.fill_out_field(field, data).await);
		}
		results
	}

	async fn fill_out_field(&self, field: &FieldConfig, data: &Value) -> bool {
		let label = field.label();
		let value = if field.action.reads_value() {
			field.resolve(data).unwrap_or(Value::Null)
		} else {
			Value::Null
		};

		match field.action {
			FieldAction::Check => self.check(&field.selector, label).await,
			FieldAction::Uncheck => self.uncheck(&field.selector, label).await,
			FieldAction::Click => {
				let budget = field.timeout_ms.map(Budget::from_millis);
				self.click_if_exists(&field.selector, label, budget).await
			}
			FieldAction::Type => self.type_if_exists(&field.selector, &as_text(&value), label).await,
			FieldAction::SelectText => self.select_by_text(&field.selector, &as_texts(&value), label).await,
			FieldAction::DeselectText => self.deselect_by_text(&field.selector, &as_texts(&value), label).await,
			FieldAction::Unknown => {
				LOG.debug(format_args!("{} for {label} skipped: unknown field type", field.selector));
				false
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn value_at_evaluates_jmespath() {
		let data = json!({
			"items": [{ "name": "first" }, { "name": "second" }],
			"theName": "My Name",
			"user": { "emails": ["a@x.io", "b@x.io"] },
			"gone": null
		});
		assert_eq!(value_at(&data, "items[0].name"), Some(json!("first")));
		assert_eq!(value_at(&data, "items[-1].name"), Some(json!("second")));
		assert_eq!(value_at(&data, "missing || theName"), Some(json!("My Name")));
		assert_eq!(value_at(&data, "items[*].name"), Some(json!(["first", "second"])));
		assert_eq!(value_at(&data, "user.emails[1]"), Some(json!("b@x.io")));
		assert_eq!(value_at(&data, "user.emails[9]"), None);
		assert_eq!(value_at(&data, "gone"), None);
		assert_eq!(value_at(&data, ""), None);
		assert_eq!(value_at(&data, "items[0"), None);
	}

	#[test]
	fn field_config_parses_kebab_case_actions() {
		let fields: Vec<FieldConfig> = serde_json::from_value(json!([
			{ "selector": "select.a", "type": "select-text", "value": "picks" },
			{ "selector": "input.b", "type": "uncheck", "label": "Terms" },
			{ "selector": "a.c", "type": "click", "timeoutMs": 500 },
			{ "selector": "d", "type": "hover" }
		]))
		.unwrap();

		assert_eq!(fields[0].action, FieldAction::SelectText);
		assert_eq!(fields[0].label(), "toggle");
		assert_eq!(fields[1].label(), "Terms");
		assert_eq!(fields[2].timeout_ms, Some(500));
		assert_eq!(fields[3].action, FieldAction::Unknown);
	}

	#[test]
	fn resolve_falls_back_to_default() {
		let field: FieldConfig = serde_json::from_value(json!({
			"selector": "input.name",
			"type": "type",
			"value": "missing.path",
			"defaultValue": "Anonymous"
		}))
		.unwrap();
		assert_eq!(field.resolve(&json!({})), Some(json!("Anonymous")));
		assert_eq!(field.resolve(&json!({ "missing": { "path": "Set" } })), Some(json!("Set")));
		assert_eq!(field.resolve(&json!({ "missing": { "path": null } })), Some(json!("Anonymous")));
	}

	#[test]
	fn texts_from_scalars_and_arrays() {
		assert_eq!(as_texts(&json!(["One", 2])), vec!["One", "2"]);
		assert_eq!(as_texts(&json!("Solo")), vec!["Solo"]);
		assert!(as_texts(&Value::Null).is_empty());
		assert_eq!(as_text(&json!(true)), "true");
	}
}
