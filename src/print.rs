//! Mapping from [`PdfOptions`] to the browser's print-to-PDF request, plus
//! the wait steps that run before printing.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

use crate::PdfOptions;

/// Selector that must exist before any wait step runs.
pub const READY_SELECTOR: &str = "body";

/// Pause used when neither a selector nor a wait time is configured.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

/// One step executed between navigation and printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitStep {
    /// Wait until the selector matches a visible element.
    Visible(String),
    /// Sleep for a fixed duration.
    Pause(Duration),
}

/// Builds the wait steps for the given options.
pub fn wait_plan(options: &PdfOptions) -> Vec<WaitStep> {
    let mut steps = Vec::new();

    if let Some(selector) = options.wait_for_selector.as_deref() {
        if !selector.is_empty() {
            steps.push(WaitStep::Visible(selector.to_string()));
        }
    }

    if !options.wait_time.is_zero() {
        steps.push(WaitStep::Pause(options.wait_time));
    }

    if steps.is_empty() {
        steps.push(WaitStep::Pause(DEFAULT_SETTLE));
    }

    steps
}

/// Translates options into the print-to-PDF request, field by field.
pub fn print_params(options: &PdfOptions) -> PrintToPdfParams {
    let mut builder = PrintToPdfParams::builder()
        .print_background(options.print_background)
        .landscape(options.landscape)
        .display_header_footer(options.display_header_footer)
        .scale(options.scale)
        .margin_top(options.margins.top)
        .margin_bottom(options.margins.bottom)
        .margin_left(options.margins.left)
        .margin_right(options.margins.right);

    if let Some(page_size) = options.page_size {
        let paper = page_size.dimensions();
        builder = builder
            .paper_width(paper.width)
            .paper_height(paper.height);
    }

    if let Some(header) = non_empty(&options.header_template) {
        builder = builder.header_template(header);
    }
    if let Some(footer) = non_empty(&options.footer_template) {
        builder = builder.footer_template(footer);
    }
    if let Some(ranges) = non_empty(&options.page_ranges) {
        builder = builder.page_ranges(ranges);
    }
    if options.prefer_css_page_size {
        builder = builder.prefer_css_page_size(true);
    }

    builder.build()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
