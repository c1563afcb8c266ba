//! Per-invocation settings resolved from flags and the config file.

use std::path::Path;

use ngsync::{ActionReadiness, ReadinessConfig};
use ngsync_runtime::LaunchOptions;
use url::Url;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Debug, Clone)]
pub struct CommandContext {
	pub config: ReadinessConfig,
	pub launch: LaunchOptions,
	pub format: OutputFormat,
}

impl CommandContext {
	/// Loads `--config` (if any) and applies flag overrides on top.
	pub fn from_cli(cli: &Cli) -> Result<Self> {
		let mut config = match &cli.config {
			Some(path) => load_config(path)?,
			None => ReadinessConfig::default(),
		};
		if let Some(timeout) = cli.timeout {
			config.total_budget_ms = timeout;
		}

		let launch = LaunchOptions {
			headless: !cli.headed,
			executable: cli.chrome.clone(),
			..LaunchOptions::for_config(&config)
		};

		Ok(Self {
			config,
			launch,
			format: cli.format,
		})
	}

	pub fn readiness(&self) -> ActionReadiness {
		ActionReadiness::new(&self.config)
	}
}

fn load_config(path: &Path) -> Result<ReadinessConfig> {
	ReadinessConfig::from_path(path).map_err(|source| CliError::Config {
		path: path.to_path_buf(),
		source,
	})
}

/// Validates `raw` as an absolute URL.
pub fn parse_url(raw: &str) -> Result<String> {
	Url::parse(raw).map(String::from).map_err(|source| CliError::Url {
		url: raw.to_string(),
		source,
	})
}
