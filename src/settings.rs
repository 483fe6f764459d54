use std::path::Path;
use std::time::Duration;

use chromepdf_lib::{BrowserOptions, Config, PageSize, PdfError, PdfOptions};

use crate::cli::RenderArgs;

/// Options after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub pdf: PdfOptions,
    pub browser: BrowserOptions,
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
pub fn resolve_settings(args: &RenderArgs, config: &Config) -> ResolvedSettings {
    let mut pdf = config.pdf_options();
    let mut browser = config.browser_options();

    if let Some(format) = args.paper {
        pdf.page_size = Some(PageSize::Format(format));
    }
    if let Some(size) = args.paper_size {
        pdf.page_size = Some(PageSize::Custom(size));
    }

    if let Some(all) = args.margin {
        pdf.margins.top = all;
        pdf.margins.bottom = all;
        pdf.margins.left = all;
        pdf.margins.right = all;
    }
    pdf.margins.top = args.margin_top.unwrap_or(pdf.margins.top);
    pdf.margins.bottom = args.margin_bottom.unwrap_or(pdf.margins.bottom);
    pdf.margins.left = args.margin_left.unwrap_or(pdf.margins.left);
    pdf.margins.right = args.margin_right.unwrap_or(pdf.margins.right);

    if args.landscape {
        pdf.landscape = true;
    }
    if let Some(scale) = args.scale {
        pdf.scale = scale;
    }
    if args.no_background {
        pdf.print_background = false;
    }
    if args.header.is_some() || args.footer.is_some() {
        pdf.display_header_footer = true;
        if args.header.is_some() {
            pdf.header_template = args.header.clone();
        }
        if args.footer.is_some() {
            pdf.footer_template = args.footer.clone();
        }
    }
    if args.page_ranges.is_some() {
        pdf.page_ranges = args.page_ranges.clone();
    }
    if args.prefer_css_page_size {
        pdf.prefer_css_page_size = true;
    }
    if args.wait_for.is_some() {
        pdf.wait_for_selector = args.wait_for.clone();
    }
    if let Some(ms) = args.wait_ms {
        pdf.wait_time = Duration::from_millis(ms);
    }
    if let Some(secs) = args.timeout {
        pdf.timeout = Duration::from_secs(secs);
    }

    if let Some(chrome) = &args.chrome {
        browser.chrome_executable = Some(chrome.clone());
    }
    if args.headful {
        browser.headless = false;
    }
    if args.no_sandbox {
        browser.sandbox = false;
    }

    ResolvedSettings { pdf, browser }
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/chromepdf/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, PdfError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        PdfError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        PdfError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective settings as a single-line string.
pub fn format_effective_config(settings: &ResolvedSettings, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let pdf = &settings.pdf;
    let paper = pdf
        .page_size
        .map(|size| size.to_string())
        .unwrap_or_else(|| "browser-default".to_string());
    let executable = settings
        .browser
        .chrome_executable
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "auto".to_string());
    format!(
        "Effective config [{source}]: paper={}, landscape={}, margins={:.2}/{:.2}/{:.2}/{:.2}, scale={:.2}, background={}, header/footer={}, wait-for={}, wait={}ms, timeout={}s, chrome={}, headless={}, sandbox={}",
        paper,
        pdf.landscape,
        pdf.margins.top,
        pdf.margins.bottom,
        pdf.margins.left,
        pdf.margins.right,
        pdf.scale,
        pdf.print_background,
        pdf.display_header_footer,
        pdf.wait_for_selector.as_deref().unwrap_or("-"),
        pdf.wait_time.as_millis(),
        pdf.timeout.as_secs(),
        executable,
        settings.browser.headless,
        settings.browser.sandbox,
    )
}
