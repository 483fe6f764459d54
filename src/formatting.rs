use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use chromepdf_lib::{ErrorOutput, PdfError, PdfOutput, CHROMEPDF_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write the status report to stdout in the requested format.
pub fn write_output(body: &PdfOutput, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Pretty => write_pretty_output(body)?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: PdfError, format: OutputFormat) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = PdfOutput::Error(ErrorOutput {
        version: CHROMEPDF_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

fn write_pretty_output(body: &PdfOutput) -> io::Result<()> {
    if io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
        return Ok(());
    }

    // Non-tty output keeps the JSON shape for pipelines.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    println!("{content}");
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &PdfOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        PdfOutput::Convert(out) => {
            let header = color("[PDF]", "32", colorize);
            writeln!(buf, "{} {}", header, out.output_path.display()).ok();
            writeln!(buf, "Source: {} ({:?})", out.source.value, out.source.kind).ok();
            writeln!(buf, "Size: {}", human_bytes(out.bytes)).ok();
            let paper = out.paper.as_deref().unwrap_or("browser default");
            let orientation = if out.landscape { "landscape" } else { "portrait" };
            writeln!(buf, "Paper: {} ({})", paper, orientation).ok();
            write!(buf, "Elapsed: {:.2}s", out.elapsed_ms as f64 / 1000.0).ok();
        }
        PdfOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            writeln!(buf, "{} {}", header, out.error.message).ok();
            write!(buf, "Category: {:?}", out.error.category).ok();
            if let Some(hint) = &out.error.remediation {
                write!(buf, "\nHint: {}", hint).ok();
            }
        }
    }
    buf
}

fn human_bytes(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value >= KIB * KIB {
        format!("{:.1} MiB", value / (KIB * KIB))
    } else if value >= KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{} B", bytes)
    }
}

fn color(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\u{1b}[{code}m{text}\u{1b}[0m")
    } else {
        text.to_string()
    }
}
