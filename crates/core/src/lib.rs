//! ngsync: readiness synchronization for headless browser automation.
//!
//! Before an automation script acts on a page it should know the page is
//! *ready*: its navigation target is attached, its document has loaded, and
//! its client-side framework has no outstanding requests. Each of these is a
//! bounded wait that degrades to "not ready" instead of failing.
//!
//! # Example
//!
//! ```ignore
//! use ngsync::{ActionReadiness, Budget, ReadinessConfig, ReadyPage};
//!
//! async fn submit(page: &dyn ngsync::PageHandle) -> bool {
//!     let readiness = ActionReadiness::new(&ReadinessConfig::default());
//!     let ready = ReadyPage::new(page, &readiness);
//!
//!     ready.type_if_exists("input.email", "you@address.com", "Email").await;
//!     ready.click_if_exists("button[type=submit]", "Submit", Some(Budget::from_millis(5_000))).await
//! }
//! ```
//!
//! Backends implement [`PageHandle`] and [`BrowserHandle`]; the crate itself
//! never talks to a browser.

mod handlers;

pub mod actions;
pub mod budget;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod page;
pub mod race;
pub mod testing;
pub mod wait;

pub use actions::{FieldAction, FieldConfig, ReadyPage};
pub use budget::{Budget, DEFAULT_BUDGET_MS};
pub use config::ReadinessConfig;
pub use error::{Error, Result};
pub use events::{TargetEvents, TopicStats};
pub use handlers::{HandlerId, Listener, Subscription};
pub use logger::{Logger, is_negligible};
pub use ngsync_protocol::{DocumentState, PageScript, scripts};
pub use page::{BrowserHandle, PageHandle, TargetId, TargetInfo, TargetTopic, is_truthy};
pub use race::{Liveness, RaceOutcome, Settler, until_settled_or_timed_out};
pub use wait::{
	ActionReadiness, DocumentStage, FrameworkStage, ReadinessStage, StageOutcome, TargetStage,
	until_document_ready, until_framework_ready, until_target_ready,
};
