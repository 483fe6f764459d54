//! Launch settings for the headless browser.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::BrowserConfig;
use serde::{Deserialize, Serialize};

use crate::{PdfError, Result};

/// Environment variable naming the Chrome/Chromium executable.
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

/// Default browser window width in pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;

/// Default browser window height in pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;

/// Default interval between readiness checks while waiting on the page.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How the browser process is started for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserOptions {
    /// Chrome/Chromium executable; `None` lets the client auto-detect one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
    /// Disable with `false` when running as root or inside containers.
    pub sandbox: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Extra command-line switches passed to the browser.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            headless: true,
            sandbox: true,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            args: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl BrowserOptions {
    /// Defaults, with the executable taken from `CHROME_PATH` when set.
    pub fn from_env() -> Self {
        Self {
            chrome_executable: chrome_path_from_env(),
            ..Self::default()
        }
    }

    /// Builds the client's launch configuration.
    pub(crate) fn to_config(&self, request_timeout: Duration) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .window_size(self.window_width, self.window_height)
            .request_timeout(request_timeout)
            .arg("--hide-scrollbars")
            .arg("--mute-audio");

        if !self.headless {
            builder = builder.with_head();
        }
        if !self.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        for arg in &self.args {
            builder = builder.arg(arg.as_str());
        }

        builder.build().map_err(PdfError::launch)
    }
}

pub fn chrome_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CHROME_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
