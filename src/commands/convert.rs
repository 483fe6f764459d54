use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use chromepdf_lib::{
    ConvertOutput, Generator, PageSource, PdfError, PdfOutput, SourceDescriptor,
    CHROMEPDF_OUTPUT_VERSION,
};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::{OutputFormat, RenderArgs};
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_settings};

/// Where the page to render comes from on the command line.
pub enum InputArg {
    /// File path, or `-` for stdin.
    Html(String),
    Url(String),
}

impl InputArg {
    fn describe(&self) -> String {
        match self {
            InputArg::Html(path) if path == "-" => "stdin".to_string(),
            InputArg::Html(path) => path.clone(),
            InputArg::Url(url) => url.clone(),
        }
    }
}

/// Run the html or url command.
pub async fn run_convert(
    config_path: Option<PathBuf>,
    input: InputArg,
    output: PathBuf,
    render: RenderArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let settings = resolve_settings(&render, &config);
    debug!("{}", format_effective_config(&settings, config_path.as_deref()));

    if let Err(err) = settings.pdf.validate() {
        return render_error(err, format);
    }

    let source = match load_source(&input).await {
        Ok(source) => source,
        Err(err) => return render_error(err, format),
    };

    let started = Instant::now();
    let generator = Generator::with_browser(settings.pdf.clone(), settings.browser.clone());
    let pdf = match generator.render(&source).await {
        Ok(pdf) => pdf,
        Err(err) => return render_error(err, format),
    };

    if is_stdout(&output) {
        return match write_stdout(&pdf) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => render_error(PdfError::Io(err), format),
        };
    }

    if let Err(err) = write_pdf(&output, &pdf) {
        return render_error(err, format);
    }
    info!(path = %output.display(), bytes = pdf.len(), "Wrote PDF");

    let body = PdfOutput::Convert(ConvertOutput {
        version: CHROMEPDF_OUTPUT_VERSION.to_string(),
        source: SourceDescriptor {
            kind: source.kind(),
            value: input.describe(),
        },
        output_path: output,
        bytes: pdf.len(),
        paper: settings.pdf.page_size.map(|size| size.to_string()),
        landscape: settings.pdf.landscape,
        elapsed_ms: started.elapsed().as_millis() as u64,
    });
    if let Err(err) = write_output(&body, format) {
        return render_error(PdfError::Config(err.to_string()), format);
    }
    ExitCode::SUCCESS
}

async fn load_source(input: &InputArg) -> Result<PageSource, PdfError> {
    match input {
        InputArg::Html(path) if path == "-" => {
            let mut html = String::new();
            tokio::io::stdin().read_to_string(&mut html).await?;
            Ok(PageSource::html(html))
        }
        InputArg::Html(path) => PageSource::from_file(Path::new(path)),
        InputArg::Url(url) => PageSource::url(url),
    }
}

fn write_pdf(path: &Path, pdf: &[u8]) -> Result<(), PdfError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, pdf)?;
    Ok(())
}

fn write_stdout(pdf: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(pdf)?;
    stdout.flush()
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}
