mod cli;

use anyhow::Context;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use receipt_ocr::{OcrConfig, ProcessingResult};

fn main() -> ExitCode {
    // stdout carries only the JSON body; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let outcome = cli::run(std::env::args_os(), OcrConfig::load, receipt_ocr::default_backend);

    match emit(&outcome.body) {
        Ok(()) => outcome.exit.into(),
        Err(e) => {
            tracing::error!("Failed to write result: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn emit(body: &ProcessingResult) -> anyhow::Result<()> {
    let json = body.to_json_pretty().context("serializing result")?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}").context("writing to stdout")?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
