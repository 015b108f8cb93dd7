//! The redaction core: merge two detector result sets and rewrite the text.
//!
//! This is the only module with non-trivial invariants. Everything else in
//! the pipeline is adapter glue; this function must be exactly right:
//!
//! * Every byte of source text not covered by a surviving entity span
//!   appears in the output unchanged and in order.
//! * Each surviving span is replaced by a single marker token — overlapping
//!   or nested detections collapse into one marker, never two.
//! * Detector offsets are validated up front. An offset past the end of the
//!   text, an inverted range, or an offset landing inside a multi-byte
//!   character fails the document with [`RedactError::EntityOutOfBounds`]
//!   instead of panicking on a slice.
//!
//! ## Merge semantics
//!
//! The two lists are concatenated (PII first, then PHI) and stable-sorted by
//! `begin`. The cursor walk keeps the first span at any position and drops
//! any entity that starts strictly inside an already-consumed span. The tie
//! order at equal `begin` therefore follows the concatenation order; this is
//! implementation-defined, not a contract, and callers must not rely on
//! which detector "wins" a tie.

use crate::error::RedactError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A detected sensitive span in a text buffer.
///
/// Produced by an external detection service; offsets are byte offsets into
/// the exact text the detector was given, as a half-open range
/// `[begin, end)`. The serde aliases let raw detector response JSON
/// (`Type` / `Score` / `BeginOffset` / `EndOffset`) deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Detector vocabulary label, e.g. `NAME`, `DATE`, `ADDRESS`.
    #[serde(alias = "Type")]
    pub category: String,
    /// Detector confidence in [0, 1].
    #[serde(alias = "Score")]
    pub score: f32,
    /// Byte offset of the first byte of the span.
    #[serde(alias = "BeginOffset")]
    pub begin: usize,
    /// Byte offset one past the last byte of the span.
    #[serde(alias = "EndOffset")]
    pub end: usize,
}

impl Entity {
    pub fn new(category: impl Into<String>, score: f32, begin: usize, end: usize) -> Self {
        Self {
            category: category.into(),
            score,
            begin,
            end,
        }
    }
}

/// Validate that every entity's offsets fit `text`.
///
/// Checks, in order: `begin <= end`, `end <= text.len()`, and both offsets
/// on `char` boundaries. Runs before any redaction so the whole document
/// fails fast on the first bad span.
pub fn validate_entities(text: &str, entities: &[Entity]) -> Result<(), RedactError> {
    for e in entities {
        let ok = e.begin <= e.end
            && e.end <= text.len()
            && text.is_char_boundary(e.begin)
            && text.is_char_boundary(e.end);
        if !ok {
            return Err(RedactError::EntityOutOfBounds {
                category: e.category.clone(),
                begin: e.begin,
                end: e.end,
                len: text.len(),
            });
        }
    }
    Ok(())
}

/// Merge the PII and PHI entity lists and rewrite `text` with each surviving
/// span replaced by `marker`.
///
/// Both lists must already be confidence-filtered
/// (see [`crate::pipeline::filter::filter_entities`]).
///
/// # Errors
/// [`RedactError::EntityOutOfBounds`] if any entity in either list does not
/// fit `text`. No partial output is produced on error.
pub fn redact(
    text: &str,
    pii: &[Entity],
    phi: &[Entity],
    marker: &str,
) -> Result<String, RedactError> {
    validate_entities(text, pii)?;
    validate_entities(text, phi)?;

    let mut merged: Vec<&Entity> = pii.iter().chain(phi.iter()).collect();
    // Stable: ties at equal `begin` keep concatenation order (pii before phi).
    merged.sort_by_key(|e| e.begin);

    let mut out = String::with_capacity(text.len());
    let mut last_end = 0usize;
    let mut emitted = 0usize;

    for e in &merged {
        if e.begin > last_end {
            out.push_str(&text[last_end..e.begin]);
        }
        if e.begin >= last_end {
            out.push_str(marker);
            last_end = e.end;
            emitted += 1;
        } else {
            // Starts inside an already-redacted span; the earlier span's
            // marker stands for this detection too.
            trace!(
                category = %e.category,
                begin = e.begin,
                end = e.end,
                "dropping overlapping entity"
            );
        }
    }
    out.push_str(&text[last_end..]);

    debug!(
        detected = merged.len(),
        markers = emitted,
        "redaction complete"
    );
    Ok(out)
}
