mod support;

use std::sync::Arc;
use std::time::Duration;

use ngsync::testing::{MockCall, MockFramework, MockPage};
use ngsync::{ActionReadiness, Budget, FieldConfig, ReadyPage, TargetTopic, scripts};
use serde_json::json;
use support::capture_logs;

fn readiness() -> ActionReadiness {
	ActionReadiness::default().with_total_budget(Budget::from_millis(100))
}

#[tokio::test(start_paused = true)]
async fn click_waits_for_readiness_alongside_the_click() {
	let (logs, _guard) = capture_logs();
	let page = Arc::new(MockPage::new("T1"));
	page.add_element("a.home");
	page.set_framework(MockFramework::SettlesAfter(Duration::from_millis(10)));

	let announcer = Arc::clone(&page);
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(5)).await;
		announcer.announce(TargetTopic::Changed);
	});

	let readiness = readiness();
	let ready = ReadyPage::new(page.as_ref(), &readiness);
	assert!(ready.click_if_exists("a.home", "Home", None).await);

	let evaluated = page.evaluated();
	assert_eq!(evaluated[0], scripts::ELEMENT_EXISTS.name);
	assert!(evaluated.contains(&scripts::CLICK.name));
	assert!(evaluated.contains(&scripts::FRAMEWORK_SETTLE.name));
	assert_eq!(logs.in_namespace("ngsync:click").last().map(|r| r.message.as_str()), Some("a.home for Home"));
}

#[tokio::test(start_paused = true)]
async fn click_on_missing_element_skips_readiness() {
	let (logs, _guard) = capture_logs();
	let page = MockPage::new("T1");
	let readiness = readiness();

	let ready = ReadyPage::new(&page, &readiness);
	assert!(!ready.click_if_exists("a.missing", "Missing", Some(Budget::from_millis(10))).await);

	assert_eq!(page.evaluated(), vec![scripts::ELEMENT_EXISTS.name]);
	assert_eq!(logs.messages(), vec!["a.missing for Missing not found"]);
}

#[tokio::test(start_paused = true)]
async fn typing_masks_password_values() {
	let (logs, _guard) = capture_logs();
	let page = MockPage::new("T1");
	page.add_element("input.email");
	page.add_password_field("input.secret");
	let readiness = readiness();
	let ready = ReadyPage::new(&page, &readiness);

	assert!(ready.type_if_exists("input.email", "you@address.com", "Email").await);
	assert!(ready.type_if_exists("input.secret", "hunter2", "Password").await);
	assert!(!ready.type_if_exists("input.none", "x", "None").await);

	assert_eq!(
		logs.messages(),
		vec![
			"you@address.com on input.email for Email",
			"******* on input.secret for Password",
			"input.none for None not found",
		]
	);
}

#[tokio::test(start_paused = true)]
async fn toggles_report_and_log_state() {
	let (logs, _guard) = capture_logs();
	let page = MockPage::new("T1");
	page.add_element("input.terms");
	page.add_element("select.size");
	let readiness = readiness();
	let ready = ReadyPage::new(&page, &readiness);

	assert!(ready.check("input.terms", "Terms").await);
	assert!(ready.uncheck("input.terms", "Terms").await);
	let sizes = vec!["S".to_string(), "M".to_string()];
	assert!(ready.select_by_text("select.size", &sizes, "Size").await);
	assert!(ready.deselect_by_text("select.size", &sizes[..1], "Size").await);
	assert!(!ready.check("input.none", "None").await);

	assert_eq!(
		logs.in_namespace("ngsync:toggle").into_iter().map(|r| r.message).collect::<Vec<_>>(),
		vec![
			"input.terms is checked for Terms",
			"input.terms is unchecked for Terms",
			"S, M to selected on select.size for Size",
			"S to deselected on select.size for Size",
			"input.none for None not found",
		]
	);

	let toggle_args = page.calls().into_iter().find_map(|call| match call {
		MockCall::Evaluate { script, args } if script == scripts::TOGGLE_SELECT.name => Some(args),
		_ => None,
	});
	assert_eq!(toggle_args, Some(vec![json!("select.size"), json!(["S", "M"]), json!(true)]));
}

#[tokio::test(start_paused = true)]
async fn failed_navigation_still_waits_for_readiness() {
	let (logs, _guard) = capture_logs();
	let page = MockPage::new("T1");
	page.fail_goto("net::ERR_NAME_NOT_RESOLVED");
	let readiness = readiness();

	let start = tokio::time::Instant::now();
	ReadyPage::new(&page, &readiness)
		.navigate_until_ready("https://unreachable.test", None)
		.await;

	assert!(start.elapsed() >= Duration::from_millis(20));
	assert_eq!(
		page.calls()[0],
		MockCall::Goto {
			url: "https://unreachable.test".into()
		}
	);
	let messages: Vec<_> = logs.in_namespace("ngsync:navigate").into_iter().map(|r| r.message).collect();
	assert_eq!(messages, vec!["https://unreachable.test error", "to https://unreachable.test"]);
}

#[tokio::test(start_paused = true)]
async fn fill_out_applies_fields_in_order_and_keeps_going() {
	let page = MockPage::new("T1");
	page.add_element("input.name");
	page.add_element("select.tags");
	page.add_element("input.news");
	let readiness = readiness();
	let ready = ReadyPage::new(&page, &readiness);

	let fields: Vec<FieldConfig> = serde_json::from_value(json!([
		{ "label": "Name", "selector": "input.name", "type": "type", "value": "person.name" },
		{ "label": "Company", "selector": "input.company", "type": "type", "value": "person.company" },
		{ "label": "Tags", "selector": "select.tags", "type": "select-text", "value": "tags", "defaultValue": ["misc"] },
		{ "label": "News", "selector": "input.news", "type": "uncheck" },
		{ "label": "Nickname", "selector": "input.name", "type": "type", "value": "person.nick", "defaultValue": "n/a" }
	]))
	.unwrap();
	let data = json!({ "person": { "name": "Ada" }, "tags": ["admin", "ops"] });

	let results = ready.fill_out(&fields, &data).await;
	assert_eq!(results, vec![true, false, true, true, true]);

	let evaluations: Vec<_> = page
		.calls()
		.into_iter()
		.filter_map(|call| match call {
			MockCall::Evaluate { script, args } => Some((script, args)),
			_ => None,
		})
		.collect();
	assert_eq!(evaluations[0], (scripts::TYPE_TEXT.name, vec![json!("input.name"), json!("Ada")]));
	assert_eq!(
		evaluations[2],
		(scripts::TOGGLE_SELECT.name, vec![json!("select.tags"), json!(["admin", "ops"]), json!(true)])
	);
	assert_eq!(evaluations[3], (scripts::TOGGLE_CHECKBOX.name, vec![json!("input.news"), json!(false)]));
	assert_eq!(evaluations[4], (scripts::TYPE_TEXT.name, vec![json!("input.name"), json!("n/a")]));
}

#[tokio::test(start_paused = true)]
async fn fill_out_skips_unknown_field_types() {
	let page = MockPage::new("T1");
	let readiness = readiness();
	let ready = ReadyPage::new(&page, &readiness);
	let fields: Vec<FieldConfig> =
		serde_json::from_value(json!([{ "selector": "div", "type": "hover" }])).unwrap();

	assert_eq!(ready.fill_out(&fields, &json!({})).await, vec![false]);
	assert!(page.calls().is_empty());
}
