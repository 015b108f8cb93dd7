//! Result types produced by the orchestrator.

use serde::{Deserialize, Serialize};

/// Successful processing of one document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutput {
    /// The redacted text written into the output document.
    pub redacted_text: String,
    /// The generated summary of what was redacted.
    pub summary: String,
    /// `bucket/key` the rendered output was stored under.
    pub output_location: String,
    /// Per-stage counters and timings.
    pub stats: ProcessingStats,
}

/// Counters and timings for one document's run.
///
/// `*_ms` fields are wall-clock stage durations; entity counts are taken
/// after confidence filtering, so `entities_redacted` can be lower than
/// `pii_detected + phi_detected` when spans overlap.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    pub extracted_chars: usize,
    pub pii_detected: usize,
    pub phi_detected: usize,
    pub entities_redacted: usize,
    pub extract_ms: u64,
    pub detect_ms: u64,
    pub summarize_ms: u64,
    pub render_ms: u64,
    pub total_ms: u64,
}

/// The structured record reported for every processed document, success or
/// failure. This is the crate's outermost surface: nothing escapes the
/// orchestrator boundary except as one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// 200 on success, 400 when no text was extracted, 500 otherwise.
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
}

impl ResultEnvelope {
    /// Envelope for a successfully processed document.
    pub fn success(output: &ProcessingOutput) -> Self {
        Self {
            status_code: 200,
            message: "Document processed and redacted successfully.".to_string(),
            redacted_text: Some(output.redacted_text.clone()),
            summary: Some(output.summary.clone()),
            output_location: Some(output.output_location.clone()),
        }
    }

    /// Envelope for a failed document.
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            redacted_text: None,
            summary: None,
            output_location: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
