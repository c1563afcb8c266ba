use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ngsync")]
#[command(about = "Browser actions synchronized with page and framework readiness")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: json (default), ndjson, or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// Readiness config file (JSON)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Total readiness budget in milliseconds (overrides the config file)
	#[arg(long, global = true, value_name = "MS")]
	pub timeout: Option<u64>,

	/// Show the browser window
	#[arg(long, global = true)]
	pub headed: bool,

	/// Chromium/Chrome executable
	#[arg(long, global = true, value_name = "PATH")]
	pub chrome: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Navigate to a URL and wait until the page is ready for actions
	#[command(alias = "nav")]
	Navigate {
		/// Target URL
		url: String,
	},

	/// Open a URL and report each readiness stage
	Wait {
		/// Target URL
		url: String,
		/// Only wait for the framework to settle
		#[arg(long)]
		framework_only: bool,
	},

	/// Click an element once the page is ready
	Click {
		/// Page URL
		url: String,
		/// CSS selector
		selector: String,
		/// Label used in logs
		#[arg(long, default_value = "click")]
		label: String,
	},

	/// Type a value into a field
	Type {
		/// Page URL
		url: String,
		/// CSS selector
		selector: String,
		/// Value to enter
		value: String,
		/// Label used in logs
		#[arg(long, default_value = "type")]
		label: String,
	},

	/// Fill out a form from a field list and a data file
	Fill {
		/// Page URL
		url: String,
		/// JSON array of field configs
		#[arg(long, value_name = "FILE")]
		form: PathBuf,
		/// JSON data the field values are looked up in
		#[arg(long, value_name = "FILE")]
		data: Option<PathBuf>,
	},
}

impl Commands {
	/// Returns the command name used in output envelopes.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Navigate { .. } => "navigate",
			Commands::Wait { .. } => "wait",
			Commands::Click { .. } => "click",
			Commands::Type { .. } => "type",
			Commands::Fill { .. } => "fill",
		}
	}
}
