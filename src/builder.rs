use std::time::Duration;

use crate::browser::BrowserOptions;
use crate::paper::{PageSize, PaperFormat, PaperSize};
use crate::{Generator, Margins, PdfOptions, Result};

/// Starts a fluent builder from the default options.
pub fn with_options() -> OptionsBuilder {
    OptionsBuilder::new()
}

/// Fluent interface over [`PdfOptions`].
///
/// ```no_run
/// use chromepdf_lib::{with_options, PaperFormat};
///
/// # async fn example() -> chromepdf_lib::Result<()> {
/// let pdf = with_options()
///     .format(PaperFormat::Letter)
///     .landscape()
///     .margin(0.5)
///     .generate("<h1>Quarterly report</h1>")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    options: PdfOptions,
    browser: Option<BrowserOptions>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing options instead of the defaults.
    pub fn from_options(options: PdfOptions) -> Self {
        Self {
            options,
            browser: None,
        }
    }

    pub fn format(mut self, format: PaperFormat) -> Self {
        self.options.page_size = Some(PageSize::Format(format));
        self
    }

    /// Custom paper size in inches; replaces any named format.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.options.page_size = Some(PageSize::Custom(PaperSize::new(width, height)));
        self
    }

    /// Leaves the paper size to the browser.
    pub fn browser_default_size(mut self) -> Self {
        self.options.page_size = None;
        self
    }

    /// All margins in inches.
    pub fn margins(mut self, top: f64, bottom: f64, left: f64, right: f64) -> Self {
        self.options.margins = Margins::new(top, bottom, left, right);
        self
    }

    pub fn margin(mut self, all: f64) -> Self {
        self.options.margins = Margins::uniform(all);
        self
    }

    pub fn landscape(mut self) -> Self {
        self.options.landscape = true;
        self
    }

    pub fn portrait(mut self) -> Self {
        self.options.landscape = false;
        self
    }

    /// Scale factor, 0.1 to 2.0.
    pub fn scale(mut self, scale: f64) -> Self {
        self.options.scale = scale;
        self
    }

    pub fn print_background(mut self, enable: bool) -> Self {
        self.options.print_background = enable;
        self
    }

    /// Enables header and footer with the given HTML templates.
    pub fn header_footer(mut self, header: impl Into<String>, footer: impl Into<String>) -> Self {
        self.options.display_header_footer = true;
        self.options.header_template = Some(header.into());
        self.options.footer_template = Some(footer.into());
        self
    }

    pub fn page_ranges(mut self, ranges: impl Into<String>) -> Self {
        self.options.page_ranges = Some(ranges.into());
        self
    }

    pub fn prefer_css_page_size(mut self, enable: bool) -> Self {
        self.options.prefer_css_page_size = enable;
        self
    }

    /// CSS selector to wait for before printing.
    pub fn wait_for(mut self, selector: impl Into<String>) -> Self {
        self.options.wait_for_selector = Some(selector.into());
        self
    }

    /// Additional wait before printing.
    pub fn wait_time(mut self, duration: Duration) -> Self {
        self.options.wait_time = duration;
        self
    }

    /// Limit for the whole conversion.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.options.timeout = duration;
        self
    }

    pub fn browser(mut self, browser: BrowserOptions) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    pub fn into_options(self) -> PdfOptions {
        self.options
    }

    pub fn build(self) -> Generator {
        let browser = self.browser.unwrap_or_else(BrowserOptions::from_env);
        Generator::with_browser(self.options, browser)
    }

    /// Builds and renders `html` in one call.
    pub async fn generate(self, html: &str) -> Result<Vec<u8>> {
        self.build().from_html(html).await
    }

    /// Builds and renders the page at `url` in one call.
    pub async fn generate_from_url(self, url: &str) -> Result<Vec<u8>> {
        self.build().from_url(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_defaults() {
        assert_eq!(with_options().into_options(), PdfOptions::default());
    }

    #[test]
    fn size_replaces_format_and_format_replaces_size() {
        let opts = with_options().format(PaperFormat::Legal).size(5.0, 7.0);
        assert_eq!(
            opts.options().page_size,
            Some(PageSize::Custom(PaperSize::new(5.0, 7.0)))
        );

        let opts = opts.format(PaperFormat::Tabloid);
        assert_eq!(
            opts.options().page_size,
            Some(PageSize::Format(PaperFormat::Tabloid))
        );

        let opts = opts.browser_default_size();
        assert!(opts.options().page_size.is_none());
    }

    #[test]
    fn header_footer_enables_display() {
        let opts = with_options()
            .header_footer("<span class=\"title\"></span>", "<span class=\"pageNumber\"></span>")
            .into_options();
        assert!(opts.display_header_footer);
        assert_eq!(
            opts.header_template.as_deref(),
            Some("<span class=\"title\"></span>")
        );
        assert_eq!(
            opts.footer_template.as_deref(),
            Some("<span class=\"pageNumber\"></span>")
        );
    }

    #[test]
    fn chained_setters_apply() {
        let opts = with_options()
            .landscape()
            .margins(0.5, 0.6, 0.7, 0.8)
            .scale(0.9)
            .print_background(false)
            .wait_for("#ready")
            .wait_time(Duration::from_millis(300))
            .timeout(Duration::from_secs(5))
            .page_ranges("2-4")
            .prefer_css_page_size(true)
            .into_options();

        assert!(opts.landscape);
        assert_eq!(opts.margins, Margins::new(0.5, 0.6, 0.7, 0.8));
        assert!((opts.scale - 0.9).abs() < f64::EPSILON);
        assert!(!opts.print_background);
        assert_eq!(opts.wait_for_selector.as_deref(), Some("#ready"));
        assert_eq!(opts.wait_time, Duration::from_millis(300));
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.page_ranges.as_deref(), Some("2-4"));
        assert!(opts.prefer_css_page_size);
    }

    #[test]
    fn portrait_undoes_landscape() {
        let opts = with_options().landscape().portrait().into_options();
        assert!(!opts.landscape);
    }

    #[test]
    fn build_keeps_explicit_browser_options() {
        let browser = BrowserOptions {
            headless: false,
            ..Default::default()
        };
        let generator = with_options().margin(0.2).browser(browser.clone()).build();
        assert_eq!(generator.browser_options(), &browser);
        assert_eq!(generator.options().margins, Margins::uniform(0.2));
    }
}
