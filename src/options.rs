//! The rendering options record handed to the browser for each conversion.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::paper::{PageSize, PaperFormat, PaperSize};
use crate::{PdfError, Result};

/// Smallest scale factor the print request accepts.
pub const MIN_SCALE: f64 = 0.1;

/// Largest scale factor the print request accepts.
pub const MAX_SCALE: f64 = 2.0;

/// Default margin on every side, in inches.
pub const DEFAULT_MARGIN: f64 = 0.4;

/// Default settle time before printing.
pub const DEFAULT_WAIT_TIME: Duration = Duration::from_secs(2);

/// Default limit for a whole conversion.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    pub fn uniform(all: f64) -> Self {
        Self::new(all, all, all, all)
    }

    fn sides(&self) -> [(&'static str, f64); 4] {
        [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ]
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN)
    }
}

/// Configuration for a single HTML or URL to PDF conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfOptions {
    /// Paper size; `None` leaves the browser's default paper in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    pub margins: Margins,
    pub landscape: bool,
    /// Include background colors and images.
    pub print_background: bool,
    /// Scale of the webpage rendering (0.1 to 2.0).
    pub scale: f64,
    pub display_header_footer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_template: Option<String>,
    /// Pages to print, e.g. `1-5, 8, 11-13`. Empty prints everything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_ranges: Option<String>,
    /// Let CSS `@page` size win over `page_size`.
    pub prefer_css_page_size: bool,
    /// CSS selector that must be visible before printing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,
    #[serde(with = "humantime_serde")]
    pub wait_time: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: Some(PageSize::Format(PaperFormat::A4)),
            margins: Margins::default(),
            landscape: false,
            print_background: true,
            scale: 1.0,
            display_header_footer: false,
            header_template: None,
            footer_template: None,
            page_ranges: None,
            prefer_css_page_size: false,
            wait_for_selector: None,
            wait_time: DEFAULT_WAIT_TIME,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PdfOptions {
    /// Paper dimensions after orientation, when a paper size is set.
    pub fn effective_paper(&self) -> Option<PaperSize> {
        self.page_size
            .map(|size| size.dimensions().oriented(self.landscape))
    }

    /// Checks field ranges before any browser work starts.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || !(MIN_SCALE..=MAX_SCALE).contains(&self.scale) {
            return Err(PdfError::invalid_options(format!(
                "scale {} is outside {}..={}",
                self.scale, MIN_SCALE, MAX_SCALE
            )));
        }

        if let Some(PageSize::Custom(size)) = self.page_size {
            if !size.is_valid() {
                return Err(PdfError::invalid_options(format!(
                    "paper size {} must have positive, finite dimensions",
                    size
                )));
            }
        }

        for (side, value) in self.margins.sides() {
            if !value.is_finite() || value < 0.0 {
                return Err(PdfError::invalid_options(format!(
                    "{side} margin {value} must be a non-negative number of inches"
                )));
            }
        }

        if let Some(paper) = self.effective_paper() {
            let m = &self.margins;
            if m.left + m.right >= paper.width || m.top + m.bottom >= paper.height {
                return Err(PdfError::invalid_options(format!(
                    "margins ({}, {}, {}, {}) leave no printable area on {} paper",
                    m.top, m.bottom, m.left, m.right, paper
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(PdfError::invalid_options("timeout must be greater than zero"));
        }

        if let Some(selector) = &self.wait_for_selector {
            if selector.trim().is_empty() {
                return Err(PdfError::invalid_options("wait-for selector must not be blank"));
            }
        }

        Ok(())
    }
}
