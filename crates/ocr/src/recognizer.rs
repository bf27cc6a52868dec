use thiserror::Error;

use crate::config::OcrConfig;
use crate::types::Recognition;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract backend not compiled in; rebuild with the `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept PNG image bytes and return recognized regions in
/// detection order.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<Recognition>, OcrError>;
}

impl<B: OcrBackend + ?Sized> OcrBackend for Box<B> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<Recognition>, OcrError> {
        (**self).recognize(image_bytes)
    }
}

/// The engine compiled into this build, configured from `config`.
#[cfg(feature = "tesseract")]
pub fn default_backend(config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    Ok(Box::new(tesseract_backend::TesseractRecognizer::new(
        config.data_path.clone(),
        &config.language,
    )))
}

#[cfg(not(feature = "tesseract"))]
pub fn default_backend(_config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    Err(OcrError::NotAvailable)
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns pre-set regions, or a pre-set engine failure.
pub struct MockRecognizer {
    outcome: Result<Vec<Recognition>, String>,
}

impl MockRecognizer {
    pub fn new(recognitions: Vec<Recognition>) -> Self {
        Self { outcome: Ok(recognitions) }
    }

    /// One region per `(text, confidence)` pair, stacked vertically.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let recognitions = lines
            .into_iter()
            .enumerate()
            .map(|(i, (text, conf))| {
                let bbox = crate::types::BoundingBox {
                    x: 0,
                    y: i as i32 * 20,
                    width: 200,
                    height: 18,
                };
                Recognition::new(bbox, text, conf)
            })
            .collect();
        Self::new(recognitions)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<Vec<Recognition>, OcrError> {
        self.outcome.clone().map_err(OcrError::Engine)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use crate::types::{BoundingBox, Recognition};
    use leptess::{capi, LepTess};
    use std::path::PathBuf;

    /// Tesseract over text lines. A fresh engine is built per call so each
    /// recognition starts from a clean state; Tesseract runs on the CPU only.
    pub struct TesseractRecognizer {
        data_path: Option<PathBuf>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<PathBuf>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<Vec<Recognition>, OcrError> {
            let data_path = self.data_path.as_ref().and_then(|p| p.to_str());
            let mut lt = LepTess::new(data_path, &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;

            let Some(boxes) = lt.get_component_boxes(capi::TessPageIteratorLevel_RIL_TEXTLINE, true)
            else {
                return Ok(Vec::new());
            };

            let mut out = Vec::new();
            for b in &boxes {
                lt.set_rectangle(&b);
                let text = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                let g = b.get_val();
                let bbox = BoundingBox { x: g.x, y: g.y, width: g.w, height: g.h };
                // mean_text_conf is reported on a 0..=100 scale.
                let confidence = f64::from(lt.mean_text_conf()) / 100.0;
                out.push(Recognition::new(bbox, text, confidence));
            }
            Ok(out)
        }
    }
}
