//! Result envelopes printed by every command.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	/// Pretty-printed JSON
	#[default]
	Json,
	/// One JSON object per line
	Ndjson,
	/// Human-readable text
	Text,
}

/// Error details in a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
	pub code: String,
	pub message: String,
}

/// Timing information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	/// Whether the command succeeded
	pub ok: bool,
	/// Command name (e.g., "navigate", "click")
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

/// Builder for [`CommandResult`].
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	timings: Option<Timings>,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			timings: None,
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code: code.into(),
			message: message.into(),
		});
		self
	}

	pub fn duration_ms(mut self, duration_ms: u64) -> Self {
		self.timings = Some(Timings { duration_ms });
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none(),
			command: self.command,
			data: self.data,
			error: self.error,
			timings: self.timings,
		}
	}
}

pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Ndjson => {
			if let Ok(json) = serde_json::to_string(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => print_result_text(result),
	}
}

fn print_result_text<T: Serialize>(result: &CommandResult<T>) {
	let mut stdout = io::stdout().lock();

	if result.ok {
		if let Some(ref data) = result.data {
			if let Ok(json) = serde_json::to_string_pretty(data) {
				let _ = writeln!(stdout, "{json}");
			}
		}
	} else if let Some(ref error) = result.error {
		let _ = writeln!(stdout, "Error [{}]: {}", error.code, error.message);
	}
	if let Some(timings) = result.timings {
		let _ = writeln!(stdout, "({}ms)", timings.duration_ms);
	}
}

/// Prints a failed envelope for `command`.
pub fn print_error(command: &str, err: &CliError, format: OutputFormat) {
	let result: CommandResult<()> = ResultBuilder::new(command).error(err.code(), err.to_string()).build();
	print_result(&result, format);
}

/// Result data for navigate.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateData {
	pub url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actual_url: Option<String>,
}

/// One readiness stage as reported by wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
	pub stage: String,
	pub ready: bool,
	pub budget_ms: u64,
	pub elapsed_ms: u64,
}

/// Result data for wait.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitData {
	pub url: String,
	pub stages: Vec<StageReport>,
}

/// Result data for click and type.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
	pub selector: String,
	pub label: String,
	pub applied: bool,
}

/// Result data for fill.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillData {
	pub fields: Vec<ActionData>,
}
