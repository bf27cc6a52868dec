use serde::{Deserialize, Serialize};

/// Wire tag reported in `extraction_method`. Downstream consumers key on this
/// value, so it stays fixed whichever engine produced the text.
pub const EXTRACTION_METHOD: &str = "easyocr";

/// Pixel region of a recognized text block.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A single region returned by the OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recognition {
    pub bbox: BoundingBox,
    pub text: String,
    /// Engine confidence (0.0 = guessed, 1.0 = certain).
    pub confidence: f64,
}

impl Recognition {
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: f64) -> Self {
        Self { bbox, text: text.into(), confidence: confidence.clamp(0.0, 1.0) }
    }
}

/// Successful extraction, serialized field-for-field onto stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptText {
    pub raw_text: String,
    pub processed_text: String,
    pub extraction_method: String,
    pub confidence_details: Vec<String>,
    pub success: bool,
}

/// Outcome of one processing run. Exactly one shape is emitted per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProcessingResult {
    Failure { error: String },
    Success(ReceiptText),
}

impl ProcessingResult {
    pub fn failure(message: impl Into<String>) -> Self {
        ProcessingResult::Failure { error: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingResult::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ProcessingResult::Failure { error } => Some(error),
            ProcessingResult::Success(_) => None,
        }
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
