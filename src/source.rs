use std::fmt;
use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{PdfError, Result};

const HTML_DATA_PREFIX: &str = "data:text/html;charset=utf-8;base64,";

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "file", "data", "about"];

/// Longest URL Chrome accepts for navigation (2 MiB).
pub const MAX_DATA_URL_LEN: usize = 2 * 1024 * 1024;

/// How a source reaches the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Address for the navigate command.
    Url(String),
    /// Markup written into a blank page; used when a `data:` URL would be
    /// too long for the browser.
    Content(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Url,
}

/// What the browser is asked to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Html(String),
    Url(Url),
}

impl PageSource {
    pub fn html(content: impl Into<String>) -> Self {
        PageSource::Html(content.into())
    }

    /// Parses and checks a URL the browser can navigate to.
    pub fn url(value: &str) -> Result<Self> {
        let url = Url::parse(value.trim())?;
        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(PdfError::Config(format!(
                "Unsupported URL scheme '{}' in {}; expected one of {}",
                url.scheme(),
                value,
                ALLOWED_SCHEMES.join(", ")
            )));
        }
        Ok(PageSource::Url(url))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PdfError::Config(format!(
                "HTML file not found: {}. Hint: check the path relative to the current working directory or use an absolute path.",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Ok(PageSource::Html(content))
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            PageSource::Html(_) => SourceKind::Html,
            PageSource::Url(_) => SourceKind::Url,
        }
    }

    /// Inline HTML goes out as a `data:` URL while it fits under
    /// [`MAX_DATA_URL_LEN`], otherwise as page content.
    pub fn navigation(&self) -> Navigation {
        match self {
            PageSource::Html(content) if data_url_len(content) <= MAX_DATA_URL_LEN => {
                Navigation::Url(html_data_url(content))
            }
            PageSource::Html(content) => Navigation::Content(content.clone()),
            PageSource::Url(url) => Navigation::Url(url.to_string()),
        }
    }
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSource::Html(content) => write!(f, "inline HTML ({} bytes)", content.len()),
            PageSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Encodes HTML as a `data:` URL. Base64 keeps `#` and `%` in the markup
/// from being read as fragment or escape characters.
pub fn html_data_url(content: &str) -> String {
    let mut url = String::with_capacity(data_url_len(content));
    url.push_str(HTML_DATA_PREFIX);
    BASE64_STANDARD.encode_string(content.as_bytes(), &mut url);
    url
}

fn data_url_len(content: &str) -> usize {
    HTML_DATA_PREFIX.len() + content.len().div_ceil(3) * 4
}
