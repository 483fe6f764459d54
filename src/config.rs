//! Optional TOML configuration supplying defaults for the CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::browser::{chrome_path_from_env, BrowserOptions, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::options::{DEFAULT_TIMEOUT, DEFAULT_WAIT_TIME};
use crate::paper::{PageSize, PaperFormat, PaperSize};
use crate::{Margins, PdfError, PdfOptions, Result};

const CONFIG_DIR: &str = "chromepdf";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page: PageConfig,
    pub wait: WaitConfig,
    pub timeouts: Timeouts,
    pub browser: BrowserSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub paper: Option<PaperFormat>,
    pub paper_size: Option<PaperSize>,
    pub margins: Margins,
    pub landscape: bool,
    pub scale: f64,
    pub print_background: bool,
    pub header_template: Option<String>,
    pub footer_template: Option<String>,
    pub page_ranges: Option<String>,
    pub prefer_css_page_size: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: None,
            paper_size: None,
            margins: Margins::default(),
            landscape: false,
            scale: 1.0,
            print_background: true,
            header_template: None,
            footer_template: None,
            page_ranges: None,
            prefer_css_page_size: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaitConfig {
    pub selector: Option<String>,
    #[serde(with = "humantime_serde")]
    pub time: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            selector: None,
            time: DEFAULT_WAIT_TIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub render: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            render: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserSection {
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    pub sandbox: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub args: Vec<String>,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            sandbox: true,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            args: Vec::new(),
        }
    }
}

impl Config {
    /// Loads config with priority: explicit path > central config > defaults.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// `$XDG_CONFIG_HOME/chromepdf/config.toml`, else `~/.config/chromepdf/config.toml`.
    pub fn central_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME")
                    .filter(|v| !v.is_empty())
                    .map(|home| PathBuf::from(home).join(".config"))
            })?;
        Some(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Checks the file's own structure. Option ranges are checked after CLI
    /// flags are merged in, since a flag may fix a value set here.
    pub fn validate(&self) -> Result<()> {
        if self.page.paper.is_some() && self.page.paper_size.is_some() {
            return Err(PdfError::Config(
                "page.paper and page.paper_size are mutually exclusive".to_string(),
            ));
        }
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(PdfError::Config(
                "browser window dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        match (self.page.paper_size, self.page.paper) {
            (Some(size), _) => PageSize::Custom(size),
            (None, Some(format)) => PageSize::Format(format),
            (None, None) => PageSize::Format(PaperFormat::A4),
        }
    }

    pub fn pdf_options(&self) -> PdfOptions {
        let page = &self.page;
        let display_header_footer =
            page.header_template.is_some() || page.footer_template.is_some();
        PdfOptions {
            page_size: Some(self.page_size()),
            margins: page.margins,
            landscape: page.landscape,
            print_background: page.print_background,
            scale: page.scale,
            display_header_footer,
            header_template: page.header_template.clone(),
            footer_template: page.footer_template.clone(),
            page_ranges: page.page_ranges.clone(),
            prefer_css_page_size: page.prefer_css_page_size,
            wait_for_selector: self.wait.selector.clone(),
            wait_time: self.wait.time,
            timeout: self.timeouts.render,
        }
    }

    /// Browser launch options; `CHROME_PATH` fills in a missing executable.
    pub fn browser_options(&self) -> BrowserOptions {
        let section = &self.browser;
        BrowserOptions {
            chrome_executable: section.chrome_path.clone().or_else(chrome_path_from_env),
            headless: section.headless,
            sandbox: section.sandbox,
            window_width: section.window_width,
            window_height: section.window_height,
            args: section.args.clone(),
            ..BrowserOptions::default()
        }
    }
}
