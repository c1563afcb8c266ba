use clap::Parser;
use ngsync_cli::cli::Cli;
use ngsync_cli::{commands, logging, output};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	if let Err(err) = commands::dispatch(cli).await {
		tracing::error!(target: "ngsync", command, error = %err, "command failed");
		output::print_error(command, &err, format);
		std::process::exit(1);
	}
}
