//! The orchestrator: one document end-to-end.
//!
//! [`process_document`] runs the strictly sequential chain
//! extract → detect → filter → redact → summarize → layout → render → store.
//! Each external call either succeeds or fails the whole document; there are
//! no retries and no partial output — the output object is written only
//! after every stage has succeeded.
//!
//! [`handle_event`] is the boundary where errors stop propagating: every
//! failure is logged with its stage context and folded into a
//! [`ResultEnvelope`] (200 / 400 / 500). Callers that want the structured
//! error instead of the envelope use [`process_document`] directly.
//!
//! Concurrent documents are isolated by construction: each event gets its
//! own invocation over shared `Arc` adapter handles and no other shared
//! state.

use crate::adapters::{DocumentRenderer, EntityDetector, ObjectStore, Summarizer, TextExtractor};
use crate::config::RedactionConfig;
use crate::error::RedactError;
use crate::event::ObjectCreatedEvent;
use crate::output::{ProcessingOutput, ProcessingStats, ResultEnvelope};
use crate::pipeline::{filter, layout, redact, summarize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The injected service handles the orchestrator and poller run against.
///
/// Constructed once at process start and shared by `Arc`; there is no lazy
/// global client anywhere in the crate.
#[derive(Clone)]
pub struct Adapters {
    pub extractor: Arc<dyn TextExtractor>,
    pub pii_detector: Arc<dyn EntityDetector>,
    pub phi_detector: Arc<dyn EntityDetector>,
    pub summarizer: Arc<dyn Summarizer>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub store: Arc<dyn ObjectStore>,
}

/// Derive the output key for an input key: basename, with a trailing `.pdf`
/// replaced by `suffix` (appended when the key has no `.pdf` extension).
pub fn derive_output_key(input_key: &str, suffix: &str) -> String {
    let basename = input_key.rsplit('/').next().unwrap_or(input_key);
    match basename.strip_suffix(".pdf") {
        Some(stem) => format!("{stem}{suffix}"),
        None => format!("{basename}{suffix}"),
    }
}

/// Process one uploaded document end-to-end.
///
/// # Errors
/// Any stage failure aborts the document: [`RedactError::NoTextExtracted`]
/// when the extractor finds nothing, otherwise the failing adapter's error.
/// Nothing is persisted for a failed document.
pub async fn process_document(
    event: &ObjectCreatedEvent,
    adapters: &Adapters,
    config: &RedactionConfig,
) -> Result<ProcessingOutput, RedactError> {
    let total_start = Instant::now();
    let key = event.decoded_key();
    info!(bucket = %event.bucket, key = %key, "processing document");

    // ── Extract ──────────────────────────────────────────────────────────
    let extract_start = Instant::now();
    let text = adapters.extractor.extract(&event.bucket, &key).await?;
    let extract_ms = extract_start.elapsed().as_millis() as u64;

    if text.trim().is_empty() {
        return Err(RedactError::NoTextExtracted {
            bucket: event.bucket.clone(),
            key,
        });
    }
    debug!(chars = text.len(), extract_ms, "text extracted");

    // ── Detect + filter ──────────────────────────────────────────────────
    let detect_start = Instant::now();
    let pii = adapters.pii_detector.detect(&text).await?;
    let phi = adapters.phi_detector.detect(&text).await?;
    let detect_ms = detect_start.elapsed().as_millis() as u64;

    let pii = filter::filter_entities(pii, config.score_threshold);
    let phi = filter::filter_entities(phi, config.score_threshold);
    debug!(
        pii_detector = adapters.pii_detector.name(),
        phi_detector = adapters.phi_detector.name(),
        pii = pii.len(),
        phi = phi.len(),
        detect_ms,
        "entities detected after filtering"
    );

    // ── Redact ───────────────────────────────────────────────────────────
    let redacted_text = redact::redact(&text, &pii, &phi, &config.marker)?;
    let entities_redacted = redacted_text.matches(config.marker.as_str()).count();

    // ── Summarize ────────────────────────────────────────────────────────
    let summarize_start = Instant::now();
    let summary =
        summarize::summarize_redactions(&adapters.summarizer, &redacted_text, config).await?;
    let summarize_ms = summarize_start.elapsed().as_millis() as u64;

    // ── Layout + render ──────────────────────────────────────────────────
    let render_start = Instant::now();
    let doc_layout = layout::build_layout(&redacted_text, &summary);
    let bytes = adapters.renderer.render(&doc_layout).await?;
    let render_ms = render_start.elapsed().as_millis() as u64;

    // ── Store ────────────────────────────────────────────────────────────
    let output_key = derive_output_key(&key, &config.output_suffix);
    adapters
        .store
        .put(&config.output_bucket, &output_key, bytes)
        .await?;
    let output_location = format!("{}/{}", config.output_bucket, output_key);

    let stats = ProcessingStats {
        extracted_chars: text.chars().count(),
        pii_detected: pii.len(),
        phi_detected: phi.len(),
        entities_redacted,
        extract_ms,
        detect_ms,
        summarize_ms,
        render_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        output = %output_location,
        markers = stats.entities_redacted,
        total_ms = stats.total_ms,
        "document redacted and stored"
    );

    Ok(ProcessingOutput {
        redacted_text,
        summary,
        output_location,
        stats,
    })
}

/// Process one document, converting every outcome into a [`ResultEnvelope`].
///
/// This is the panic-free outer surface intended for trigger handlers: no
/// error propagates past it.
pub async fn handle_event(
    event: &ObjectCreatedEvent,
    adapters: &Adapters,
    config: &RedactionConfig,
) -> ResultEnvelope {
    match process_document(event, adapters, config).await {
        Ok(output) => ResultEnvelope::success(&output),
        Err(e) => {
            error!(
                bucket = %event.bucket,
                key = %event.key,
                error = %e,
                "document processing failed"
            );
            let message = match &e {
                RedactError::NoTextExtracted { .. } => "No text found in document.".to_string(),
                other => format!("Error processing document: {other}"),
            };
            ResultEnvelope::failure(e.status_code(), message)
        }
    }
}
