//! Readiness waiters and the action-readiness orchestrator.
//!
//! Every waiter answers one question within a [`Budget`](crate::Budget) and
//! folds failures into `false`; nothing here returns an error.

mod document;
mod framework;
mod orchestrator;
mod target;

use crate::logger::Logger;

pub use document::until_document_ready;
pub use framework::until_framework_ready;
pub use orchestrator::{ActionReadiness, DocumentStage, FrameworkStage, ReadinessStage, StageOutcome, TargetStage};
pub use target::until_target_ready;

pub(crate) const LOG: Logger = Logger::new("ngsync:wait");
