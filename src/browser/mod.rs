//! Headless browser automation over the Chrome DevTools Protocol.
//!
//! # Module Structure
//!
//! - `launch` - Browser launch options and client configuration
//! - `session` - One browser session: navigate, wait, print, close
//!
//! The conversion steps are written against [`PageDriver`] so the command
//! sequence can run without a real browser in tests.

mod launch;
mod session;

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

use crate::Result;

pub use launch::{
    chrome_path_from_env, BrowserOptions, CHROME_PATH_ENV, DEFAULT_POLL_INTERVAL,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};
pub(crate) use session::ChromeSession;

/// Page-level commands issued during a conversion.
pub(crate) trait PageDriver {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Replaces the current document with `html`.
    async fn set_content(&mut self, html: &str) -> Result<()>;

    /// Waits until the document is parsed and `selector` exists.
    async fn wait_ready(&mut self, selector: &str) -> Result<()>;

    /// Waits until `selector` matches a visible element.
    async fn wait_visible(&mut self, selector: &str) -> Result<()>;

    async fn pause(&mut self, duration: Duration) -> Result<()>;

    async fn print_pdf(&mut self, params: PrintToPdfParams) -> Result<Vec<u8>>;

    /// Releases the page and browser. Failures are logged, not returned,
    /// so they never mask the conversion result.
    async fn close(self);
}
