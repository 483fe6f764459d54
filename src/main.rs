mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_convert, InputArg};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Html {
            input,
            output,
            render,
        } => {
            run_convert(
                args.config,
                InputArg::Html(input),
                output,
                render,
                args.format,
            )
            .await
        }
        Commands::Url {
            url,
            output,
            render,
        } => run_convert(args.config, InputArg::Url(url), output, render, args.format).await,
    }
}

/// Logs go to stderr so stdout stays free for reports and PDF bytes.
/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,chromepdf=debug,chromepdf_lib=debug,chromiumoxide=off"
    } else {
        "warn,chromiumoxide=off"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
