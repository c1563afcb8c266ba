mod support;

use std::sync::Arc;
use std::time::Duration;

use ngsync::testing::MockPage;
use ngsync::{Budget, TargetEvents, TargetInfo, TargetTopic, TopicStats, until_target_ready};

const BUDGET: Budget = Budget::from_millis(100);

fn released_once() -> TopicStats {
	TopicStats {
		added: 1,
		removed: 1,
		active: 0,
	}
}

#[tokio::test(start_paused = true)]
async fn matching_targetchanged_resolves_ready() {
	let page = Arc::new(MockPage::new("T1"));
	let events = page.events();

	let announcer = Arc::clone(&page);
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(30)).await;
		announcer.announce(TargetTopic::Changed);
	});

	let start = tokio::time::Instant::now();
	assert!(until_target_ready(page.as_ref(), BUDGET).await);
	assert!(start.elapsed() < BUDGET.as_duration());

	assert_eq!(events.stats(TargetTopic::Created), released_once());
	assert_eq!(events.stats(TargetTopic::Changed), released_once());
}

#[tokio::test(start_paused = true)]
async fn matching_targetcreated_resolves_ready() {
	let page = Arc::new(MockPage::new("T1"));
	let announcer = Arc::clone(&page);
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(5)).await;
		announcer.announce(TargetTopic::Created);
	});

	assert!(until_target_ready(page.as_ref(), BUDGET).await);
	assert_eq!(page.events().stats(TargetTopic::Created).active, 0);
}

#[tokio::test(start_paused = true)]
async fn budget_elapsing_resolves_not_ready() {
	let page = MockPage::new("T1");
	let events = page.events();

	let start = tokio::time::Instant::now();
	assert!(!until_target_ready(&page, BUDGET).await);
	assert!(start.elapsed() >= BUDGET.as_duration());

	assert_eq!(events.stats(TargetTopic::Created), released_once());
	assert_eq!(events.stats(TargetTopic::Changed), released_once());
}

#[tokio::test(start_paused = true)]
async fn other_targets_are_ignored() {
	let events = Arc::new(TargetEvents::new());
	let page = MockPage::with_events("T1", Arc::clone(&events));

	let noise = Arc::clone(&events);
	tokio::spawn(async move {
		for id in ["T2", "T3"] {
			tokio::time::sleep(Duration::from_millis(10)).await;
			noise.emit(TargetTopic::Changed, &TargetInfo::page(id, "https://example.com"));
		}
	});

	assert!(!until_target_ready(&page, BUDGET).await);
	assert_eq!(events.stats(TargetTopic::Changed), released_once());
}

#[tokio::test(start_paused = true)]
async fn events_after_the_wait_reach_no_stale_listener() {
	let page = MockPage::new("T1");
	let events = page.events();

	assert!(!until_target_ready(&page, Budget::from_millis(10)).await);
	page.announce(TargetTopic::Changed);
	page.announce(TargetTopic::Created);

	assert_eq!(events.listener_count(TargetTopic::Changed), 0);
	assert_eq!(events.listener_count(TargetTopic::Created), 0);
	assert_eq!(events.stats(TargetTopic::Changed).removed, 1);
}

#[tokio::test(start_paused = true)]
async fn zero_budget_does_not_hang() {
	let page = MockPage::new("T1");
	assert!(!until_target_ready(&page, Budget::ZERO).await);
	assert_eq!(page.events().stats(TargetTopic::Created), released_once());
}
