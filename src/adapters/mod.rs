//! External service seams.
//!
//! Every managed service the pipeline depends on — text extraction, entity
//! detection, summarization, document rendering, blob storage — sits behind
//! a narrow async trait here. The orchestrator and poller receive concrete
//! implementations as `Arc<dyn …>` handles at construction time (explicit
//! dependency injection; there is no lazily-initialised process-global
//! client), which also makes every stage trivially replaceable with a fixed
//! double in tests.
//!
//! This crate ships only local implementations of [`ObjectStore`]
//! ([`memory::MemoryStore`], [`fs::FsStore`]); real cloud clients live in
//! downstream crates that implement these traits.

pub mod fs;
pub mod memory;

use crate::error::RedactError;
use crate::pipeline::layout::DocumentLayout;
use crate::pipeline::redact::Entity;
use async_trait::async_trait;

/// Extracts the text of a stored source document.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Run OCR/structure analysis on `bucket/key` and return the recovered
    /// text, one line per text line. May be empty when the document carries
    /// no text; the orchestrator turns that into a client error.
    async fn extract(&self, bucket: &str, key: &str) -> Result<String, RedactError>;
}

/// Detects sensitive entities in extracted text.
///
/// One implementation per detection vocabulary (PII, PHI); both share this
/// shape and differ only in labels and scoring. Returned offsets index into
/// the exact `text` given.
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Vocabulary name used in logs and error context, e.g. `"pii"`.
    fn name(&self) -> &str;

    async fn detect(&self, text: &str) -> Result<Vec<Entity>, RedactError>;
}

/// Generates the natural-language summary of what was redacted.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Invoke `model_id` with the given prompt and sampling temperature.
    async fn summarize(
        &self,
        prompt: &str,
        model_id: &str,
        temperature: f32,
    ) -> Result<String, RedactError>;
}

/// Renders a [`DocumentLayout`] into output document bytes.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>, RedactError>;
}

/// Blob storage, addressed by `(bucket, key)`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), RedactError>;

    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RedactError>;

    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, RedactError>;
}
