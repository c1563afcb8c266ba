//! Mapping of DevTools errors onto [`ngsync::Error`].

use chromiumoxide::error::CdpError;
use ngsync::Error;

pub(crate) fn from_cdp(err: CdpError) -> Error {
	match err {
		CdpError::Timeout => Error::Timeout("DevTools request timed out".to_string()),
		CdpError::JavascriptException(details) => {
			let message = details
				.exception
				.as_ref()
				.and_then(|exception| exception.description.clone())
				.unwrap_or_else(|| details.text.clone());
			Error::Evaluation(message)
		}
		other => Error::Protocol(other.to_string()),
	}
}
