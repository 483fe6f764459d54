use chromepdf_lib::{PaperFormat, PaperSize};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chromepdf")]
#[command(
    version,
    about = "ChromePDF - Render HTML or URLs to PDF through a headless Chrome",
    long_about = "ChromePDF\n\nModes:\n- html: render an HTML file (or stdin with --input -) to PDF.\n- url: render a web page to PDF.\n\nThe browser is found via --chrome, the config file, CHROME_PATH, or auto-detection.\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for paper/margins/waits/timeouts/browser; CLI flags override config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "json",
        help = "Status report format"
    )]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an HTML document to PDF
    Html {
        #[arg(long, short, help = "HTML file to render, or - to read stdin")]
        input: String,

        #[arg(long, short, help = "PDF output path, or - to write the PDF to stdout")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a web page to PDF
    Url {
        #[arg(long, help = "Page address (http, https, file, data or about URL)")]
        url: String,

        #[arg(long, short, help = "PDF output path, or - to write the PDF to stdout")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Print and browser flags shared by both subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    #[arg(
        long,
        value_name = "FORMAT",
        conflicts_with = "paper_size",
        help = "Paper format (A3, A4, Letter, Legal, Tabloid)"
    )]
    pub paper: Option<PaperFormat>,

    #[arg(long, value_name = "WxH", help = "Custom paper size in inches (e.g., 8.5x11)")]
    pub paper_size: Option<PaperSize>,

    #[arg(long, value_name = "INCHES", help = "Margin for all four sides")]
    pub margin: Option<f64>,

    #[arg(long, value_name = "INCHES")]
    pub margin_top: Option<f64>,

    #[arg(long, value_name = "INCHES")]
    pub margin_bottom: Option<f64>,

    #[arg(long, value_name = "INCHES")]
    pub margin_left: Option<f64>,

    #[arg(long, value_name = "INCHES")]
    pub margin_right: Option<f64>,

    #[arg(long, help = "Landscape orientation")]
    pub landscape: bool,

    #[arg(long, help = "Rendering scale (0.1 to 2.0)")]
    pub scale: Option<f64>,

    #[arg(long, help = "Do not print background colors and images")]
    pub no_background: bool,

    #[arg(long, value_name = "HTML", help = "Header template; enables header/footer display")]
    pub header: Option<String>,

    #[arg(long, value_name = "HTML", help = "Footer template; enables header/footer display")]
    pub footer: Option<String>,

    #[arg(long, value_name = "RANGES", help = "Pages to print (e.g., 1-3,5)")]
    pub page_ranges: Option<String>,

    #[arg(long, help = "Prefer CSS @page size over the paper flags")]
    pub prefer_css_page_size: bool,

    #[arg(long, value_name = "SELECTOR", help = "Wait until this CSS selector is visible")]
    pub wait_for: Option<String>,

    #[arg(long, value_name = "MS", help = "Extra wait before printing (milliseconds)")]
    pub wait_ms: Option<u64>,

    #[arg(long, value_name = "SECS", help = "Limit for the whole conversion (seconds)")]
    pub timeout: Option<u64>,

    #[arg(long, value_name = "PATH", help = "Chrome/Chromium executable")]
    pub chrome: Option<PathBuf>,

    #[arg(long, help = "Show the browser window")]
    pub headful: bool,

    #[arg(long, help = "Disable the browser sandbox (needed as root or in containers)")]
    pub no_sandbox: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
