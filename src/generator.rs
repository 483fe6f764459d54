//! Runs one browser session per conversion: navigate, wait, print, collect.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::browser::{BrowserOptions, ChromeSession, PageDriver};
use crate::print::{print_params, wait_plan, WaitStep, READY_SELECTOR};
use crate::source::{Navigation, PageSource};
use crate::{PdfError, PdfOptions, Result};

/// Page loaded before inline HTML is written into it.
const BLANK_PAGE: &str = "about:blank";

/// How long closing the browser may take once the PDF is in hand.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Converts HTML content or URLs to PDF bytes with fixed options.
#[derive(Debug, Clone)]
pub struct Generator {
    options: PdfOptions,
    browser: BrowserOptions,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(PdfOptions::default())
    }
}

impl Generator {
    /// Uses `CHROME_PATH` (or auto-detection) to find the browser.
    pub fn new(options: PdfOptions) -> Self {
        Self::with_browser(options, BrowserOptions::from_env())
    }

    pub fn with_browser(options: PdfOptions, browser: BrowserOptions) -> Self {
        Self { options, browser }
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    pub fn browser_options(&self) -> &BrowserOptions {
        &self.browser
    }

    /// Renders an HTML string.
    pub async fn from_html(&self, html: &str) -> Result<Vec<u8>> {
        self.render(&PageSource::html(html)).await
    }

    /// Renders the page at `url`.
    pub async fn from_url(&self, url: &str) -> Result<Vec<u8>> {
        let source = PageSource::url(url)?;
        self.render(&source).await
    }

    pub async fn from_html_to_file(&self, html: &str, path: &Path) -> Result<usize> {
        self.render_to_file(&PageSource::html(html), path).await
    }

    pub async fn from_url_to_file(&self, url: &str, path: &Path) -> Result<usize> {
        let source = PageSource::url(url)?;
        self.render_to_file(&source, path).await
    }

    /// Renders `source` and writes the PDF to `path`, returning its size.
    pub async fn render_to_file(&self, source: &PageSource, path: &Path) -> Result<usize> {
        let pdf = self.render(source).await?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &pdf).await?;
        debug!(path = %path.display(), bytes = pdf.len(), "PDF written");
        Ok(pdf.len())
    }

    /// Validates the options, then runs one session. Launch and page work
    /// share the configured timeout; closing the browser does not count
    /// against it.
    pub async fn render(&self, source: &PageSource) -> Result<Vec<u8>> {
        self.options.validate()?;

        let started = Instant::now();
        let deadline = started + self.options.timeout;
        let target = source.navigation();
        debug!(source = %source, timeout = ?self.options.timeout, "Starting PDF conversion");

        let session = within(
            deadline,
            self.options.timeout,
            ChromeSession::launch(&self.browser, self.options.timeout),
        )
        .await?;
        let pdf = convert(session, &target, &self.options, deadline).await?;

        info!(
            source = %source,
            bytes = pdf.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "PDF generated"
        );
        Ok(pdf)
    }
}

/// Runs `fut` until `deadline`, reporting expiry as [`PdfError::Timeout`].
async fn within<T>(
    deadline: Instant,
    limit: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(PdfError::Timeout(limit)),
    }
}

/// Drives the page until `deadline`, then closes the driver. A printed PDF
/// is returned even when cleanup is slow.
pub(crate) async fn convert<D: PageDriver>(
    mut driver: D,
    target: &Navigation,
    options: &PdfOptions,
    deadline: Instant,
) -> Result<Vec<u8>> {
    let result = within(deadline, options.timeout, drive(&mut driver, target, options)).await;
    if timeout(CLOSE_GRACE, driver.close()).await.is_err() {
        warn!("Browser did not close within {CLOSE_GRACE:?}; it is killed on drop");
    }
    result
}

/// The fixed command sequence of a conversion.
pub(crate) async fn drive<D: PageDriver>(
    driver: &mut D,
    target: &Navigation,
    options: &PdfOptions,
) -> Result<Vec<u8>> {
    debug!("Navigating");
    match target {
        Navigation::Url(url) => driver.navigate(url).await?,
        Navigation::Content(html) => {
            driver.navigate(BLANK_PAGE).await?;
            driver.set_content(html).await?;
        }
    }
    driver.wait_ready(READY_SELECTOR).await?;

    for step in wait_plan(options) {
        match step {
            WaitStep::Visible(selector) => {
                debug!(selector = %selector, "Waiting for visible element");
                driver.wait_visible(&selector).await?;
            }
            WaitStep::Pause(duration) => {
                debug!(?duration, "Waiting before print");
                driver.pause(duration).await?;
            }
        }
    }

    debug!("Printing to PDF");
    driver.print_pdf(print_params(options)).await
}

/// Converts HTML with default options.
pub async fn from_html(html: &str) -> Result<Vec<u8>> {
    Generator::default().from_html(html).await
}

/// Converts a URL with default options.
pub async fn from_url(url: &str) -> Result<Vec<u8>> {
    Generator::default().from_url(url).await
}
