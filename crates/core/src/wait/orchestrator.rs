use std::time::Duration;

use async_trait::async_trait;
use ngsync_protocol::DocumentState;
use tokio::time::Instant;

use super::{until_document_ready, until_framework_ready, until_target_ready};
use crate::budget::Budget;
use crate::config::ReadinessConfig;
use crate::page::PageHandle;

/// One readiness stage run by [`ActionReadiness`].
#[async_trait]
pub trait ReadinessStage: Send + Sync {
	/// Stage name used in log records.
	fn name(&self) -> &'static str;

	/// Waits at most `budget`; returns whether the stage's condition held.
	async fn wait(&self, page: &dyn PageHandle, budget: Budget) -> bool;
}

/// Waits for the page's navigation target to be (re-)announced.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetStage;

#[async_trait]
impl ReadinessStage for TargetStage {
	fn name(&self) -> &'static str {
		"target"
	}

	async fn wait(&self, page: &dyn PageHandle, budget: Budget) -> bool {
		until_target_ready(page, budget).await
	}
}

/// Waits for `document.readyState` to reach an accepted state.
#[derive(Debug, Clone)]
pub struct DocumentStage {
	states: Vec<DocumentState>,
}

impl DocumentStage {
	pub fn new(states: Vec<DocumentState>) -> Self {
		Self { states }
	}
}

impl Default for DocumentStage {
	fn default() -> Self {
		Self::new(ReadinessConfig::default().document_states)
	}
}

#[async_trait]
impl ReadinessStage for DocumentStage {
	fn name(&self) -> &'static str {
		"document"
	}

	async fn wait(&self, page: &dyn PageHandle, budget: Budget) -> bool {
		until_document_ready(page, budget, &self.states).await
	}
}

/// Waits for the framework to report no outstanding requests.
#[derive(Debug, Clone)]
pub struct FrameworkStage {
	markers: Vec<String>,
}

impl FrameworkStage {
	pub fn new(markers: Vec<String>) -> Self {
		Self { markers }
	}
}

impl Default for FrameworkStage {
	fn default() -> Self {
		Self::new(ReadinessConfig::default().markers)
	}
}

#[async_trait]
impl ReadinessStage for FrameworkStage {
	fn name(&self) -> &'static str {
		"framework"
	}

	async fn wait(&self, page: &dyn PageHandle, budget: Budget) -> bool {
		until_framework_ready(page, budget, &self.markers).await
	}
}

/// Runs target, document and framework readiness in sequence.
///
/// Stage budgets are fixed shares of the total, not of the time remaining:
/// target gets 1/5, document 2/5, framework the whole total. A stage that
/// times out or fails only contributes no guarantee; the next stage still runs.
pub struct ActionReadiness {
	target: Box<dyn ReadinessStage>,
	document: Box<dyn ReadinessStage>,
	framework: Box<dyn ReadinessStage>,
	total: Budget,
}

impl ActionReadiness {
	/// Builds the default stages from `config`.
	pub fn new(config: &ReadinessConfig) -> Self {
		Self {
			target: Box::new(TargetStage),
			document: Box::new(DocumentStage::new(config.document_states.clone())),
			framework: Box::new(FrameworkStage::new(config.markers.clone())),
			total: config.total_budget(),
		}
	}

	/// Uses custom stages with the default total budget.
	pub fn with_stages(
		target: impl ReadinessStage + 'static,
		document: impl ReadinessStage + 'static,
		framework: impl ReadinessStage + 'static,
	) -> Self {
		Self {
			target: Box::new(target),
			document: Box::new(document),
			framework: Box::new(framework),
			total: Budget::default(),
		}
	}

	/// Replaces the default total budget.
	pub fn with_total_budget(mut self, total: Budget) -> Self {
		self.total = total;
		self
	}

	/// Returns the default total budget.
	pub fn total_budget(&self) -> Budget {
		self.total
	}

	/// Waits until the page is ready for the next action.
	///
	/// Never fails; completes after all three stages have finished or timed out.
	pub async fn wait_until_action_ready(&self, page: &dyn PageHandle, total: Option<Budget>) {
		self.run_action_stages(page, total).await;
	}

	/// Runs target, document and framework in order and reports each stage.
	pub async fn run_action_stages(&self, page: &dyn PageHandle, total: Option<Budget>) -> Vec<StageOutcome> {
		let total = total.unwrap_or(self.total);
		vec![
			run_stage(self.target.as_ref(), page, total.share(1, 5)).await,
			run_stage(self.document.as_ref(), page, total.share(2, 5)).await,
			run_stage(self.framework.as_ref(), page, total).await,
		]
	}

	/// Runs only the framework stage, for state changes that involve neither
	/// navigation nor new targets.
	pub async fn wait_until_framework_ready(&self, page: &dyn PageHandle, budget: Option<Budget>) {
		self.run_framework_stage(page, budget).await;
	}

	/// Framework-only counterpart of [`run_action_stages`](Self::run_action_stages).
	pub async fn run_framework_stage(&self, page: &dyn PageHandle, budget: Option<Budget>) -> StageOutcome {
		run_stage(self.framework.as_ref(), page, budget.unwrap_or(self.total)).await
	}
}

impl Default for ActionReadiness {
	fn default() -> Self {
		Self::new(&ReadinessConfig::default())
	}
}

impl std::fmt::Debug for ActionReadiness {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionReadiness")
			.field("stages", &[self.target.name(), self.document.name(), self.framework.name()])
			.field("total", &self.total)
			.finish()
	}
}

/// How one stage of a readiness wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageOutcome {
	pub stage: &'static str,
	pub ready: bool,
	pub budget: Budget,
	pub elapsed: Duration,
}

async fn run_stage(stage: &dyn ReadinessStage, page: &dyn PageHandle, budget: Budget) -> StageOutcome {
	let started = Instant::now();
	let ready = stage.wait(page, budget).await;
	tracing::debug!(
		target: "ngsync",
		namespace = "ngsync:wait",
		stage = stage.name(),
		ready,
		budget_ms = budget.as_millis(),
		"{} stage finished",
		stage.name()
	);
	StageOutcome {
		stage: stage.name(),
		ready,
		budget,
		elapsed: started.elapsed(),
	}
}
