mod support;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ngsync::testing::{MockDocument, MockFramework, MockPage};
use ngsync::{ActionReadiness, Budget, PageHandle, ReadinessConfig, ReadinessStage, TargetTopic};
use parking_lot::Mutex;
use support::capture_logs;

type Invocations = Arc<Mutex<Vec<(&'static str, u64)>>>;

struct SpyStage {
	name: &'static str,
	ready: bool,
	invocations: Invocations,
}

impl SpyStage {
	fn new(name: &'static str, ready: bool, invocations: &Invocations) -> Self {
		Self {
			name,
			ready,
			invocations: Arc::clone(invocations),
		}
	}
}

#[async_trait]
impl ReadinessStage for SpyStage {
	fn name(&self) -> &'static str {
		self.name
	}

	async fn wait(&self, _page: &dyn PageHandle, budget: Budget) -> bool {
		self.invocations.lock().push((self.name, budget.as_millis()));
		self.ready
	}
}

fn spies(invocations: &Invocations) -> ActionReadiness {
	ActionReadiness::with_stages(
		SpyStage::new("target", false, invocations),
		SpyStage::new("document", true, invocations),
		SpyStage::new("framework", true, invocations),
	)
}

#[tokio::test(start_paused = true)]
async fn stages_receive_fixed_shares_of_the_total() {
	let invocations = Invocations::default();
	let readiness = spies(&invocations);
	let page = MockPage::new("T1");

	readiness.wait_until_action_ready(&page, Some(Budget::from_millis(100))).await;

	assert_eq!(*invocations.lock(), vec![("target", 20), ("document", 40), ("framework", 100)]);
}

#[tokio::test(start_paused = true)]
async fn default_total_is_25_seconds() {
	let invocations = Invocations::default();
	let readiness = spies(&invocations);
	let page = MockPage::new("T1");

	readiness.wait_until_action_ready(&page, None).await;

	assert_eq!(
		*invocations.lock(),
		vec![("target", 5_000), ("document", 10_000), ("framework", 25_000)]
	);
}

#[tokio::test(start_paused = true)]
async fn one_debug_record_per_stage_in_order() {
	let (logs, _guard) = capture_logs();
	let invocations = Invocations::default();
	let readiness = spies(&invocations);
	let page = MockPage::new("T1");

	readiness.wait_until_action_ready(&page, Some(Budget::from_millis(100))).await;

	let records = logs.in_namespace("ngsync:wait");
	let stages: Vec<_> = records
		.iter()
		.map(|r| (r.field("stage"), r.field("ready"), r.field("budget_ms")))
		.collect();
	assert_eq!(
		stages,
		vec![
			(Some("target"), Some("false"), Some("20")),
			(Some("document"), Some("true"), Some("40")),
			(Some("framework"), Some("true"), Some("100")),
		]
	);
}

#[tokio::test(start_paused = true)]
async fn framework_entry_point_runs_only_the_framework_stage() {
	let invocations = Invocations::default();
	let readiness = spies(&invocations).with_total_budget(Budget::from_millis(300));
	let page = MockPage::new("T1");

	readiness.wait_until_framework_ready(&page, None).await;
	readiness.wait_until_framework_ready(&page, Some(Budget::from_millis(7))).await;

	assert_eq!(*invocations.lock(), vec![("framework", 300), ("framework", 7)]);
}

#[tokio::test(start_paused = true)]
async fn missing_target_costs_about_the_target_share() {
	let readiness = ActionReadiness::new(&ReadinessConfig::default());
	let page = MockPage::new("T1");
	page.set_document(MockDocument::Ready);
	page.set_framework(MockFramework::Absent);

	let start = tokio::time::Instant::now();
	readiness.wait_until_action_ready(&page, Some(Budget::from_millis(100))).await;
	let elapsed = start.elapsed();

	assert!(elapsed >= Duration::from_millis(20), "{elapsed:?}");
	assert!(elapsed < Duration::from_millis(40), "{elapsed:?}");
	assert_eq!(page.events().stats(TargetTopic::Changed).active, 0);
}

#[tokio::test(start_paused = true)]
async fn stage_timeouts_do_not_abort_later_stages() {
	let (logs, _guard) = capture_logs();
	let readiness = ActionReadiness::default();
	let page = MockPage::new("T1");
	page.set_document(MockDocument::Pending);
	page.set_framework(MockFramework::SettlesAfter(Duration::from_millis(5)));

	readiness.wait_until_action_ready(&page, Some(Budget::from_millis(50))).await;

	let stages: Vec<_> = logs
		.records()
		.iter()
		.filter_map(|r| Some((r.field("stage")?.to_string(), r.field("ready")?.to_string())))
		.collect();
	assert_eq!(
		stages,
		vec![
			("target".to_string(), "false".to_string()),
			("document".to_string(), "false".to_string()),
			("framework".to_string(), "true".to_string()),
		]
	);
}

#[tokio::test(start_paused = true)]
async fn stage_outcomes_report_shares_and_elapsed_time() {
	let readiness = ActionReadiness::default();
	let page = MockPage::new("T1");
	page.set_document(MockDocument::Ready);
	page.set_framework(MockFramework::SettlesAfter(Duration::from_millis(30)));

	let outcomes = readiness.run_action_stages(&page, Some(Budget::from_millis(100))).await;

	let summary: Vec<_> = outcomes
		.iter()
		.map(|o| (o.stage, o.ready, o.budget.as_millis(), o.elapsed.as_millis()))
		.collect();
	assert_eq!(
		summary,
		vec![("target", false, 20, 20), ("document", true, 40, 0), ("framework", true, 100, 30)]
	);

	let framework = readiness.run_framework_stage(&page, None).await;
	assert_eq!(framework.stage, "framework");
	assert_eq!(framework.budget, readiness.total_budget());
	assert!(framework.ready);
}
