use std::path::Path;
use thiserror::Error;

use crate::config::OcrConfig;
use crate::filter;
use crate::normalize;
use crate::preprocess;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::{ProcessingResult, ReceiptText, Recognition, EXTRACTION_METHOD};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Preprocess(#[from] crate::preprocess::PreprocessError),
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Orchestrates: validate path → prepare image → OCR → confidence filter → normalize.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
    config: OcrConfig,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R, config: OcrConfig) -> Self {
        Self { recognizer, config }
    }

    /// Process a receipt image on disk. Every failure is folded into
    /// [`ProcessingResult::Failure`]; nothing is propagated.
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        tracing::info!("Processing image: {}", path.display());

        if !path.exists() {
            return ProcessingResult::failure(format!("Image file not found: {}", path.display()));
        }

        match self.recognize_file(path) {
            Ok(recognitions) => shape_result(&recognitions),
            Err(e) => {
                tracing::error!("OCR processing failed: {e}");
                ProcessingResult::failure(format!("OCR processing failed: {e}"))
            }
        }
    }

    /// Process an image already in memory.
    pub fn process_bytes(&self, data: &[u8]) -> ProcessingResult {
        match self.recognize_bytes(data) {
            Ok(recognitions) => shape_result(&recognitions),
            Err(e) => {
                tracing::error!("OCR processing failed: {e}");
                ProcessingResult::failure(format!("OCR processing failed: {e}"))
            }
        }
    }

    fn recognize_file(&self, path: &Path) -> Result<Vec<Recognition>, PipelineError> {
        let image_bytes = preprocess::prepare_for_ocr(path, &self.config)?;
        self.run_engine(&image_bytes)
    }

    fn recognize_bytes(&self, data: &[u8]) -> Result<Vec<Recognition>, PipelineError> {
        let image_bytes = preprocess::prepare_for_ocr_from_bytes(data, &self.config)?;
        self.run_engine(&image_bytes)
    }

    fn run_engine(&self, image_bytes: &[u8]) -> Result<Vec<Recognition>, PipelineError> {
        let recognitions = self.recognizer.recognize(image_bytes)?;
        tracing::debug!(regions = recognitions.len(), "recognition finished");
        Ok(recognitions)
    }
}

/// Apply the empty-result policies, the confidence filter and normalization.
pub fn shape_result(recognitions: &[Recognition]) -> ProcessingResult {
    if recognitions.is_empty() {
        return ProcessingResult::failure("No text detected in image");
    }

    let filtered = filter::partition(recognitions);
    if filtered.is_empty() {
        tracing::warn!(
            regions = recognitions.len(),
            "every region fell at or below the confidence threshold"
        );
        return ProcessingResult::failure("No high-confidence text detected in image");
    }

    let raw_text = filtered.raw_text();
    tracing::info!(
        "Extracted {} characters from {} text regions",
        raw_text.chars().count(),
        filtered.high_confidence.len()
    );

    let processed_text = normalize::clean_receipt_text(&raw_text);
    ProcessingResult::Success(ReceiptText {
        raw_text,
        processed_text,
        extraction_method: EXTRACTION_METHOD.to_string(),
        confidence_details: filtered.details,
        success: true,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
