use crate::types::Recognition;

/// Recognitions must score strictly above this to reach `raw_text`.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Recognitions split by confidence, detection order preserved in both halves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredText {
    /// Text of every recognition above [`CONFIDENCE_THRESHOLD`].
    pub high_confidence: Vec<String>,
    /// Every recognition, annotated as `"<text> (conf: 0.87)"`.
    pub details: Vec<String>,
}

impl FilteredText {
    /// High-confidence strings joined by newlines.
    pub fn raw_text(&self) -> String {
        self.high_confidence.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.high_confidence.is_empty()
    }
}

pub fn partition(recognitions: &[Recognition]) -> FilteredText {
    let mut out = FilteredText::default();
    for r in recognitions {
        out.details.push(annotate(r));
        if r.confidence > CONFIDENCE_THRESHOLD {
            out.high_confidence.push(r.text.clone());
        }
    }
    out
}

fn annotate(r: &Recognition) -> String {
    format!("{} (conf: {:.2})", r.text, r.confidence)
}
