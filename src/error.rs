//! Error types for the medredact library.
//!
//! A single [`RedactError`] enum covers every way a document can fail. The
//! taxonomy collapses to two reportable classes:
//!
//! * **Client errors** (400) — the document itself is unusable, most
//!   importantly [`RedactError::NoTextExtracted`]. Resubmitting the same
//!   document will fail the same way.
//!
//! * **Server errors** (500) — an adapter call failed or a detector
//!   returned offsets the text cannot satisfy. These are environmental or
//!   upstream faults; the document may succeed on a later attempt.
//!
//! [`RedactError::status_code`] performs that mapping. The orchestrator
//! catches everything at its boundary and folds it into a
//! [`crate::output::ResultEnvelope`] — no error escapes uncaught, and no
//! partial output is persisted for a failed document.

use thiserror::Error;

/// All errors returned by the medredact library.
#[derive(Debug, Error)]
pub enum RedactError {
    // ── Document errors ───────────────────────────────────────────────────
    /// The extractor ran successfully but recovered no text at all.
    #[error("No text found in document '{key}' (bucket '{bucket}')")]
    NoTextExtracted { bucket: String, key: String },

    /// A detected entity's offsets do not fit the extracted text.
    ///
    /// Raised by the validation pass that runs before any redaction, so an
    /// out-of-range or mid-character offset fails the document with context
    /// instead of panicking on a slice.
    #[error("Entity '{category}' has invalid offsets [{begin}, {end}) for text of {len} bytes")]
    EntityOutOfBounds {
        category: String,
        begin: usize,
        end: usize,
        len: usize,
    },

    // ── Adapter errors ────────────────────────────────────────────────────
    /// The text-extraction service failed.
    #[error("Text extraction failed for '{key}': {detail}")]
    ExtractionFailed { key: String, detail: String },

    /// An entity-detection service failed.
    #[error("Entity detection ({detector}) failed: {detail}")]
    DetectionFailed { detector: String, detail: String },

    /// The summarization model invocation failed.
    #[error("Summarization failed (model '{model_id}'): {detail}")]
    SummarizationFailed { model_id: String, detail: String },

    /// The document renderer failed to produce output bytes.
    #[error("Document rendering failed: {0}")]
    RenderFailed(String),

    /// A storage operation failed.
    #[error("Storage {op} failed for '{bucket}/{key}': {detail}")]
    StorageFailed {
        op: &'static str,
        bucket: String,
        key: String,
        detail: String,
    },

    /// A client could not authenticate against its backing service.
    #[error(
        "No credentials available for {service}.\n\
         Configure credentials before submitting documents."
    )]
    CredentialsMissing { service: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RedactError {
    /// HTTP-style status code for the result envelope.
    ///
    /// 400 when the document itself is the problem, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self {
            RedactError::NoTextExtracted { .. } => 400,
            _ => 500,
        }
    }
}
