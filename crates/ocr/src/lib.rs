//! Receipt OCR: recognition, confidence filtering and text normalization.
//!
//! [`ReceiptPipeline`] turns an image into a [`ProcessingResult`] for the
//! `receipt-processor` binary. [`build_extraction_prompt`] is for downstream
//! consumers that hand `processed_text` to a language model for transaction
//! extraction; the binary itself never calls it.

pub mod config;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod preprocess;
pub mod prompt;
pub mod recognizer;
pub mod types;

pub use config::{ConfigError, OcrConfig};
pub use filter::{partition, FilteredText, CONFIDENCE_THRESHOLD};
pub use normalize::clean_receipt_text;
pub use pipeline::{PipelineError, ReceiptPipeline};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use prompt::build_extraction_prompt;
pub use recognizer::{default_backend, MockRecognizer, OcrBackend, OcrError};
pub use types::{BoundingBox, ProcessingResult, ReceiptText, Recognition, EXTRACTION_METHOD};
