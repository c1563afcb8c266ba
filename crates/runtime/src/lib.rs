//! Chromium backend for ngsync.
//!
//! Launches Chromium through the DevTools protocol ([`chromiumoxide`]) and
//! exposes its pages as [`ngsync::PageHandle`]s. Target lifecycle events are
//! pumped into an [`ngsync::TargetEvents`] hub shared by every page of a
//! session.

mod browser;
mod error;
mod page;
mod session;

pub use browser::ChromiumBrowser;
pub use page::ChromiumPage;
pub use session::{ChromiumSession, LaunchOptions, REQUEST_TIMEOUT_MARGIN, request_timeout_for};
