//! A single browser session driven over the DevTools protocol.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::launch::BrowserOptions;
use super::PageDriver;
use crate::{PdfError, Result};

/// Browser process, its protocol handler task, and the page being printed.
///
/// Dropping the session aborts the handler task and kills the browser.
pub(crate) struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    poll_interval: Duration,
}

impl ChromeSession {
    pub(crate) async fn launch(options: &BrowserOptions, request_timeout: Duration) -> Result<Self> {
        let config = options.to_config(request_timeout)?;
        debug!(
            headless = options.headless,
            sandbox = options.sandbox,
            executable = ?options.chrome_executable,
            "Launching browser"
        );

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| PdfError::launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                handler.abort();
                return Err(err.into());
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
            poll_interval: options.poll_interval,
        })
    }

    async fn poll_until(&self, script: &str) -> Result<()> {
        loop {
            let done: bool = self.page.evaluate(script).await?.into_value()?;
            if done {
                return Ok(());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

impl PageDriver for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn set_content(&mut self, html: &str) -> Result<()> {
        self.page.set_content(html).await?;
        Ok(())
    }

    async fn wait_ready(&mut self, selector: &str) -> Result<()> {
        let script = ready_script(selector)?;
        self.poll_until(&script).await
    }

    async fn wait_visible(&mut self, selector: &str) -> Result<()> {
        let script = visible_script(selector)?;
        self.poll_until(&script).await
    }

    async fn pause(&mut self, duration: Duration) -> Result<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn print_pdf(&mut self, params: PrintToPdfParams) -> Result<Vec<u8>> {
        Ok(self.page.pdf(params).await?)
    }

    async fn close(mut self) {
        if let Err(e) = self.page.clone().close().await {
            warn!("Failed to close page: {e}");
        }
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
            return;
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        debug!("Browser session closed");
    }
}

/// Document parsed and the selector present.
fn ready_script(selector: &str) -> Result<String> {
    let quoted = serde_json::to_string(selector)?;
    Ok(format!(
        "document.readyState !== 'loading' && document.querySelector({quoted}) !== null"
    ))
}

/// Selector matches an element with a box that is not hidden.
fn visible_script(selector: &str) -> Result<String> {
    let quoted = serde_json::to_string(selector)?;
    Ok(format!(
        r#"(() => {{
  const el = document.querySelector({quoted});
  if (!el) return false;
  const style = window.getComputedStyle(el);
  if (style.display === 'none' || style.visibility === 'hidden') return false;
  const rect = el.getBoundingClientRect();
  return rect.width > 0 && rect.height > 0;
}})()"#
    ))
}
