//! # medredact
//!
//! Redact PII/PHI from uploaded medical documents and produce a summarized,
//! redacted output PDF.
//!
//! ## Why this crate?
//!
//! The surrounding system is managed services: a document-OCR service
//! extracts text, two entity-detection services score sensitive spans (one
//! general-PII vocabulary, one medical-PHI vocabulary), a generative model
//! summarizes what was removed, a renderer produces the output document, and
//! blob storage moves bytes. This crate owns the piece those services
//! cannot: merging two independently-scored entity lists against one text
//! buffer, resolving overlaps, and substituting redaction markers while
//! preserving every non-sensitive byte — plus the orchestration and client
//! polling around it. All services sit behind narrow traits in
//! [`adapters`], injected explicitly at startup.
//!
//! ## Pipeline Overview
//!
//! ```text
//! upload (client)
//!  │
//!  ├─ 1. Trigger    new-object notification (bucket + key)
//!  ├─ 2. Extract    OCR text via the TextExtractor adapter
//!  ├─ 3. Detect     PII + PHI entity lists (two EntityDetector adapters)
//!  ├─ 4. Filter     keep entities with score > 0.8
//!  ├─ 5. Redact     merge spans, rewrite text with [REDACTED] markers
//!  ├─ 6. Summarize  model explains what was redacted (temperature 0.1)
//!  ├─ 7. Render     two-page layout → output document bytes
//!  └─ 8. Store      <input name>_redacted.pdf in the output bucket
//! ```
//!
//! The client polls the output bucket for the derived key ([`poller`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medredact::{handle_event, Adapters, ObjectCreatedEvent, RedactionConfig};
//!
//! # async fn run(adapters: Adapters) {
//! let config = RedactionConfig::default();
//! let event = ObjectCreatedEvent::new("medical-non-redacted-documents", "scan.pdf");
//! let envelope = handle_event(&event, &adapters, &config).await;
//! println!("{} — {}", envelope.status_code, envelope.message);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `medredact` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod adapters;
pub mod config;
pub mod error;
pub mod event;
pub mod output;
pub mod pipeline;
pub mod poller;
pub mod process;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RedactionConfig, RedactionConfigBuilder, DEFAULT_MARKER, DEFAULT_SCORE_THRESHOLD};
pub use error::RedactError;
pub use event::ObjectCreatedEvent;
pub use output::{ProcessingOutput, ProcessingStats, ResultEnvelope};
pub use pipeline::filter::filter_entities;
pub use pipeline::layout::{build_layout, Block, DocumentLayout, Page};
pub use pipeline::redact::{redact, validate_entities, Entity};
pub use poller::{poll_for_output, submit_and_poll, PollOutcome};
pub use process::{derive_output_key, handle_event, process_document, Adapters};
