use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use crate::config::OcrConfig;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Decode a receipt image and return PNG bytes ready for the engine.
///
/// With `config.preprocess` off the image is only re-encoded, which still
/// rejects files that are not decodable images.
pub fn prepare_for_ocr(path: &Path, config: &OcrConfig) -> Result<Vec<u8>, PreprocessError> {
    let img = image::open(path)?;
    prepare(img, config)
}

pub fn prepare_for_ocr_from_bytes(
    data: &[u8],
    config: &OcrConfig,
) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    prepare(img, config)
}

fn prepare(img: DynamicImage, config: &OcrConfig) -> Result<Vec<u8>, PreprocessError> {
    let img = if config.preprocess {
        normalize(img, config.max_dimension)
    } else {
        img
    };
    tracing::debug!(width = img.width(), height = img.height(), "image prepared");
    encode_as_png(img)
}

/// Size cap, grayscale, contrast stretch.
///
/// Phone photos of thermal receipts are low contrast (grey ink on off-white
/// paper). Tesseract binarizes internally, and a narrow luma range makes that
/// threshold unstable, which shows up as low per-line confidence and more
/// lines dropped at the 0.5 cutoff.
fn normalize(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let img = if img.width() > max_dimension || img.height() > max_dimension {
        img.resize(max_dimension, max_dimension, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let gray: GrayImage = img.to_luma8();

    let (lo, hi) = gray
        .pixels()
        .fold((255u8, 0u8), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));

    if hi == lo {
        return DynamicImage::ImageLuma8(gray);
    }

    let range = (hi - lo) as u32;
    let stretched: GrayImage = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([((p - lo) as u32 * 255 / range) as u8])
    });

    DynamicImage::ImageLuma8(stretched)
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
