//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One `ngsync` log record.
#[derive(Debug, Clone, Default)]
pub struct Record {
	pub message: String,
	pub fields: BTreeMap<String, String>,
}

impl Record {
	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields.get(name).map(String::as_str)
	}

	pub fn namespace(&self) -> Option<&str> {
		self.field("namespace")
	}
}

#[derive(Default)]
struct RecordVisitor {
	record: Record,
}

impl Visit for RecordVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		self.insert(field, value.to_string());
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		self.insert(field, format!("{value:?}"));
	}
}

impl RecordVisitor {
	fn insert(&mut self, field: &Field, value: String) {
		if field.name() == "message" {
			self.record.message = value;
		} else {
			self.record.fields.insert(field.name().to_string(), value);
		}
	}
}

/// Layer collecting events emitted with target `ngsync`.
#[derive(Clone, Default)]
pub struct Capture {
	records: Arc<Mutex<Vec<Record>>>,
}

impl Capture {
	pub fn records(&self) -> Vec<Record> {
		self.records.lock().clone()
	}

	pub fn in_namespace(&self, namespace: &str) -> Vec<Record> {
		self.records()
			.into_iter()
			.filter(|record| record.namespace() == Some(namespace))
			.collect()
	}

	pub fn messages(&self) -> Vec<String> {
		self.records().into_iter().map(|record| record.message).collect()
	}
}

impl<S: Subscriber> Layer<S> for Capture {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		if event.metadata().target() != "ngsync" {
			return;
		}
		let mut visitor = RecordVisitor::default();
		event.record(&mut visitor);
		self.records.lock().push(visitor.record);
	}
}

/// Installs a capturing subscriber for the current thread.
///
/// Keep the guard alive for the duration of the test.
pub fn capture_logs() -> (Capture, DefaultGuard) {
	let capture = Capture::default();
	let subscriber = tracing_subscriber::registry().with(capture.clone());
	let guard = tracing::subscriber::set_default(subscriber);
	(capture, guard)
}

pub fn markers() -> Vec<String> {
	ngsync::ReadinessConfig::default().markers
}
