use ngsync_protocol::{DocumentState, scripts};
use serde_json::Value;

use super::LOG;
use crate::budget::Budget;
use crate::error::Error;
use crate::page::PageHandle;

/// Waits until `document.readyState` is one of `states`.
///
/// Delegates polling to [`PageHandle::wait_for_function`]. A timeout yields
/// `false` silently; any other failure is logged (unless negligible) and also
/// yields `false`.
pub async fn until_document_ready(page: &dyn PageHandle, budget: Budget, states: &[DocumentState]) -> bool {
	let accepted = Value::Array(states.iter().map(|state| Value::from(state.as_str())).collect());

	match page.wait_for_function(&scripts::DOCUMENT_READY, vec![accepted], budget).await {
		Ok(_) => true,
		Err(Error::Timeout(_)) => false,
		Err(err) => LOG.debug_and_return(false, "document readiness", &err),
	}
}
