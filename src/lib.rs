//! ChromePDF Library
//!
//! Converts HTML content or URLs to PDF by driving a headless Chrome through
//! the DevTools protocol. Layout, rendering and PDF encoding all happen in the
//! browser; this crate configures the print request and runs the
//! navigate, wait, print sequence.
//!
//! # Module Overview
//!
//! - [`options`] - The rendering options record and its validation
//! - [`builder`] - Fluent builder over the options
//! - [`generator`] - One browser session per conversion
//! - [`print`] - Options to print-request mapping and wait steps
//! - [`browser`] - Browser launch settings and the DevTools session
//! - [`paper`] - Paper formats and custom sizes
//! - [`source`] - HTML and URL page sources
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use chromepdf_lib::{from_html, with_options, PaperFormat};
//! use std::time::Duration;
//!
//! # async fn example() -> chromepdf_lib::Result<()> {
//! let simple = from_html("<h1>Hello</h1>").await?;
//!
//! let tuned = with_options()
//!     .format(PaperFormat::Tabloid)
//!     .landscape()
//!     .header_footer("<span class=\"title\"></span>", "<span class=\"pageNumber\"></span>")
//!     .wait_for("#chart")
//!     .wait_time(Duration::from_millis(200))
//!     .generate_from_url("https://example.com/report")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod options;
pub mod output;
pub mod paper;
pub mod print;
pub mod source;

pub use browser::{BrowserOptions, CHROME_PATH_ENV};
pub use builder::{with_options, OptionsBuilder};
pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, PdfError, Result};
pub use generator::{from_html, from_url, Generator};
pub use options::{Margins, PdfOptions, DEFAULT_TIMEOUT, DEFAULT_WAIT_TIME, MAX_SCALE, MIN_SCALE};
pub use output::{
    ConvertOutput, ErrorOutput, PdfOutput, SourceDescriptor, CHROMEPDF_OUTPUT_VERSION,
};
pub use paper::{PageSize, PaperFormat, PaperParseError, PaperSize};
pub use source::{PageSource, SourceKind};
