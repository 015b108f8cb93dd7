//! Confidence filtering of detector results.
//!
//! Detectors return everything they saw, scored. Policy keeps only entities
//! whose confidence strictly exceeds the threshold (0.8 by default) — an
//! entity scored exactly at the threshold is dropped. Both detection
//! vocabularies are filtered with the same threshold before merging.

use crate::pipeline::redact::Entity;
use tracing::debug;

/// Keep the entities with `score > threshold`, preserving input order.
pub fn filter_entities(entities: Vec<Entity>, threshold: f32) -> Vec<Entity> {
    let before = entities.len();
    let kept: Vec<Entity> = entities
        .into_iter()
        .filter(|e| e.score > threshold)
        .collect();
    if kept.len() != before {
        debug!(
            dropped = before - kept.len(),
            kept = kept.len(),
            threshold,
            "filtered low-confidence entities"
        );
    }
    kept
}
