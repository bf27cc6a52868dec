use receipt_ocr::{
    ConfigError, OcrBackend, OcrConfig, OcrError, ProcessingResult, ReceiptPipeline,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

pub const USAGE: &str = "Usage: receipt-processor <image_path>";

/// The single operand after the program name, taken verbatim. `--`, flags
/// and empty strings are paths like any other.
fn image_path<I, T>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut operands = args.into_iter().skip(1).map(Into::into);
    match (operands.next(), operands.next()) {
        (Some(path), None) => Some(PathBuf::from(path)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => ExitCode::SUCCESS,
            Exit::Failure => ExitCode::FAILURE,
        }
    }
}

/// JSON body to print and the status to exit with.
#[derive(Debug)]
pub struct Outcome {
    pub body: ProcessingResult,
    pub exit: Exit,
}

impl Outcome {
    fn rejected(message: impl Into<String>) -> Self {
        let body = ProcessingResult::failure(message);
        if let Some(error) = body.error() {
            tracing::error!("{error}");
        }
        Self { body, exit: Exit::Failure }
    }
}

/// Validate arguments, resolve config and engine, then process the image.
///
/// Only checks made before recognition exit non-zero. Errors raised while
/// recognizing are printed as the JSON body with a zero status, which is
/// what existing callers of this tool expect.
pub fn run<I, T>(
    args: I,
    load_config: impl FnOnce() -> Result<OcrConfig, ConfigError>,
    engine: impl FnOnce(&OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError>,
) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let Some(path) = image_path(args) else {
        return Outcome::rejected(USAGE);
    };

    if !path.exists() {
        return Outcome::rejected(format!("Image file not found: {}", path.display()));
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => return Outcome::rejected(format!("Invalid configuration: {e}")),
    };

    let backend = match engine(&config) {
        Ok(backend) => backend,
        Err(e) => return Outcome::rejected(format!("Missing OCR engine: {e}")),
    };

    tracing::debug!(language = %config.language, preprocess = config.preprocess, "engine ready");
    let body = ReceiptPipeline::new(backend, config).process_file(&path);

    match &body {
        ProcessingResult::Success(text) => tracing::info!(
            method = %text.extraction_method,
            regions = text.confidence_details.len(),
            processed_chars = text.processed_text.chars().count(),
            "receipt processed"
        ),
        ProcessingResult::Failure { error } => tracing::warn!("receipt not processed: {error}"),
    }

    Outcome { body, exit: Exit::Success }
}
