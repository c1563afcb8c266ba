use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("browser launch failed: {0}")]
	Launch(#[source] ngsync::Error),

	#[error("invalid config {path}: {source}")]
	Config {
		path: PathBuf,
		#[source]
		source: ngsync::Error,
	},

	#[error("invalid url '{url}': {source}")]
	Url {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("cannot read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("element not found: {selector}")]
	ElementNotFound { selector: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Core(#[from] ngsync::Error),
}

impl CliError {
	/// Stable machine-readable code for output envelopes.
	pub fn code(&self) -> &'static str {
		match self {
			CliError::Launch(_) => "BROWSER_LAUNCH_FAILED",
			CliError::Config { .. } => "INVALID_CONFIG",
			CliError::Url { .. } => "INVALID_URL",
			CliError::Read { .. } | CliError::Io(_) => "IO_ERROR",
			CliError::ElementNotFound { .. } => "ELEMENT_NOT_FOUND",
			CliError::Json(_) => "INVALID_JSON",
			CliError::Core(err) if err.is_timeout() => "TIMEOUT",
			CliError::Core(_) => "INTERNAL_ERROR",
		}
	}
}
