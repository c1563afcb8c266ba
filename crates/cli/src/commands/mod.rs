//! Command implementations.

mod actions;
mod fill;
mod navigate;
mod wait;

use std::time::Instant;

use ngsync_runtime::{ChromiumPage, ChromiumSession};
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{ResultBuilder, print_result};

pub async fn dispatch(cli: Cli) -> Result<()> {
	let ctx = CommandContext::from_cli(&cli)?;
	let command = cli.command.name();
	tracing::info!(target: "ngsync", command, budget_ms = ctx.config.total_budget_ms, "running command");

	match cli.command {
		Commands::Navigate { url } => navigate::execute(&ctx, &url).await,
		Commands::Wait { url, framework_only } => wait::execute(&ctx, &url, framework_only).await,
		Commands::Click { url, selector, label } => actions::click(&ctx, &url, &selector, &label).await,
		Commands::Type {
			url,
			selector,
			value,
			label,
		} => actions::type_text(&ctx, &url, &selector, &value, &label).await,
		Commands::Fill { url, form, data } => fill::execute(&ctx, &url, &form, data.as_deref()).await,
	}
}

/// A launched browser with one open tab.
struct OpenPage {
	session: ChromiumSession,
	page: ChromiumPage,
	started: Instant,
}

impl OpenPage {
	async fn open(ctx: &CommandContext) -> Result<Self> {
		let started = Instant::now();
		let session = ChromiumSession::launch(ctx.launch.clone())
			.await
			.map_err(CliError::Launch)?;
		let page = match session.new_page("about:blank").await {
			Ok(page) => page,
			Err(err) => {
				close_session(session).await;
				return Err(CliError::Launch(err));
			}
		};
		Ok(Self { session, page, started })
	}

	fn elapsed_ms(&self) -> u64 {
		u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
	}

	/// Closes the browser and prints `data` on success.
	async fn finish<T: Serialize>(self, ctx: &CommandContext, command: &str, data: Result<T>) -> Result<()> {
		let duration_ms = self.elapsed_ms();
		close_session(self.session).await;
		let data = data?;
		let result = ResultBuilder::new(command).data(data).duration_ms(duration_ms).build();
		print_result(&result, ctx.format);
		Ok(())
	}
}

async fn close_session(session: ChromiumSession) {
	if let Err(err) = session.close().await {
		tracing::warn!(target: "ngsync", error = %err, "closing browser");
	}
}
