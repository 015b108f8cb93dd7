//! Pipeline stages for document redaction.
//!
//! Each submodule implements exactly one transformation step, so every stage
//! is independently testable and stays pure where the data allows it.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ filter ──▶ redact ──▶ summarize ──▶ layout ──▶ render
//! (adapter)  (score>τ)  (merge +    (adapter)    (pages/    (adapter)
//!                        rewrite)                 blocks)
//! ```
//!
//! 1. [`filter`]    — drop detections at or below the confidence threshold
//! 2. [`redact`]    — validate offsets, merge both detector lists, rewrite
//!    the text with markers; the only stage with non-trivial invariants
//! 3. [`summarize`] — build the fixed prompt and call the summarizer adapter
//! 4. [`layout`]    — assemble the two-page block layout for the renderer

pub mod filter;
pub mod layout;
pub mod redact;
pub mod summarize;
