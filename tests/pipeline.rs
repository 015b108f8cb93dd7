//! End-to-end pipeline tests with simulated adapters.
//!
//! Every external service is replaced by a fixed-output double, so these
//! tests pin down the orchestration contract exactly: what reaches each
//! adapter, what lands in the store, and what the result envelope reports
//! for success and for each failure class.

use async_trait::async_trait;
use medredact::adapters::memory::MemoryStore;
use medredact::adapters::{
    DocumentRenderer, EntityDetector, ObjectStore, Summarizer, TextExtractor,
};
use medredact::{
    handle_event, process_document, Adapters, Block, DocumentLayout, Entity, ObjectCreatedEvent,
    RedactError, RedactionConfig,
};
use std::sync::{Arc, Mutex};

const SOURCE_TEXT: &str = "Patient John Doe, DOB 01/01/1980, visited.";
const SUMMARY: &str = "Here is the summary:\n* A patient name was redacted.\n* A date of birth was redacted.";

// ── Simulated adapters ───────────────────────────────────────────────────────

struct FixedExtractor(String);

#[async_trait]
impl TextExtractor for FixedExtractor {
    async fn extract(&self, _bucket: &str, _key: &str) -> Result<String, RedactError> {
        Ok(self.0.clone())
    }
}

struct FixedDetector {
    name: &'static str,
    entities: Vec<Entity>,
}

#[async_trait]
impl EntityDetector for FixedDetector {
    fn name(&self) -> &str {
        self.name
    }

    async fn detect(&self, _text: &str) -> Result<Vec<Entity>, RedactError> {
        Ok(self.entities.clone())
    }
}

struct FailingDetector;

#[async_trait]
impl EntityDetector for FailingDetector {
    fn name(&self) -> &str {
        "pii"
    }

    async fn detect(&self, _text: &str) -> Result<Vec<Entity>, RedactError> {
        Err(RedactError::DetectionFailed {
            detector: "pii".into(),
            detail: "service unavailable".into(),
        })
    }
}

/// Records the redacted text it was asked to summarize.
struct FixedSummarizer {
    seen_prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(
        &self,
        prompt: &str,
        _model_id: &str,
        _temperature: f32,
    ) -> Result<String, RedactError> {
        self.seen_prompts.lock().unwrap().push(prompt.to_string());
        Ok(SUMMARY.to_string())
    }
}

/// Serializes the layout as JSON so assertions can reconstruct it.
struct JsonRenderer;

#[async_trait]
impl DocumentRenderer for JsonRenderer {
    async fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>, RedactError> {
        serde_json::to_vec(layout).map_err(|e| RedactError::RenderFailed(e.to_string()))
    }
}

// ── Wiring helpers ───────────────────────────────────────────────────────────

fn pii_entities() -> Vec<Entity> {
    vec![
        Entity::new("NAME", 0.9, 8, 16),
        // Below threshold; must not be redacted.
        Entity::new("OTHER", 0.8, 0, 7),
    ]
}

fn phi_entities() -> Vec<Entity> {
    vec![Entity::new("DATE", 0.95, 23, 33)]
}

fn adapters_with(
    extractor: Arc<dyn TextExtractor>,
    pii: Arc<dyn EntityDetector>,
    store: Arc<MemoryStore>,
) -> (Adapters, Arc<FixedSummarizer>) {
    let summarizer = Arc::new(FixedSummarizer {
        seen_prompts: Mutex::new(Vec::new()),
    });
    let adapters = Adapters {
        extractor,
        pii_detector: pii,
        phi_detector: Arc::new(FixedDetector {
            name: "phi",
            entities: phi_entities(),
        }),
        summarizer: summarizer.clone(),
        renderer: Arc::new(JsonRenderer),
        store,
    };
    (adapters, summarizer)
}

fn happy_adapters(store: Arc<MemoryStore>) -> (Adapters, Arc<FixedSummarizer>) {
    adapters_with(
        Arc::new(FixedExtractor(SOURCE_TEXT.to_string())),
        Arc::new(FixedDetector {
            name: "pii",
            entities: pii_entities(),
        }),
        store,
    )
}

fn event() -> ObjectCreatedEvent {
    ObjectCreatedEvent::new("medical-non-redacted-documents", "uploads/john+doe.pdf")
}

// ── Success path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_success() {
    let store = Arc::new(MemoryStore::new());
    let (adapters, summarizer) = happy_adapters(store.clone());
    let config = RedactionConfig::default();

    let output = process_document(&event(), &adapters, &config)
        .await
        .expect("pipeline should succeed");

    // Redaction result is exact: score-0.8 entity filtered out (strict >),
    // both surviving spans replaced.
    assert_eq!(
        output.redacted_text,
        "Patient [REDACTED], DOB [REDACTED], visited."
    );
    assert_eq!(output.summary, SUMMARY);
    assert_eq!(
        output.output_location,
        "medical-redacted-documents/john doe_redacted.pdf"
    );
    assert_eq!(output.stats.pii_detected, 1);
    assert_eq!(output.stats.phi_detected, 1);
    assert_eq!(output.stats.entities_redacted, 2);

    // The summarizer only ever saw redacted text.
    let prompts = summarizer.seen_prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("[REDACTED]"));
    assert!(!prompts[0].contains("John Doe"));

    // Stored object at the derived key is the rendered two-page layout.
    let bytes = store
        .get("medical-redacted-documents", "john doe_redacted.pdf")
        .await
        .unwrap();
    let layout: DocumentLayout = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(layout.pages.len(), 2);
    assert_eq!(
        layout.pages[0].blocks[1],
        Block::Paragraph("Patient [REDACTED], DOB [REDACTED], visited.".into())
    );
    assert_eq!(
        layout.pages[1].blocks[1],
        Block::Paragraph("Here is the summary:".into())
    );
    assert_eq!(
        layout.pages[1].blocks[2],
        Block::Bullet("A patient name was redacted.".into())
    );
}

#[tokio::test]
async fn envelope_reports_success() {
    let store = Arc::new(MemoryStore::new());
    let (adapters, _) = happy_adapters(store);
    let config = RedactionConfig::default();

    let envelope = handle_event(&event(), &adapters, &config).await;
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.message, "Document processed and redacted successfully.");
    assert_eq!(
        envelope.redacted_text.as_deref(),
        Some("Patient [REDACTED], DOB [REDACTED], visited.")
    );
    assert_eq!(
        envelope.output_location.as_deref(),
        Some("medical-redacted-documents/john doe_redacted.pdf")
    );
}

// ── Failure paths ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_extraction_is_a_400_and_persists_nothing() {
    let store = Arc::new(MemoryStore::new());
    let (adapters, _) = adapters_with(
        Arc::new(FixedExtractor("  \n ".to_string())),
        Arc::new(FixedDetector {
            name: "pii",
            entities: Vec::new(),
        }),
        store.clone(),
    );
    let config = RedactionConfig::default();

    let envelope = handle_event(&event(), &adapters, &config).await;
    assert_eq!(envelope.status_code, 400);
    assert_eq!(envelope.message, "No text found in document.");
    assert!(envelope.redacted_text.is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn detector_failure_is_a_500_and_persists_nothing() {
    let store = Arc::new(MemoryStore::new());
    let (adapters, _) = adapters_with(
        Arc::new(FixedExtractor(SOURCE_TEXT.to_string())),
        Arc::new(FailingDetector),
        store.clone(),
    );
    let config = RedactionConfig::default();

    let envelope = handle_event(&event(), &adapters, &config).await;
    assert_eq!(envelope.status_code, 500);
    assert!(envelope.message.contains("service unavailable"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn out_of_bounds_detection_fails_the_document() {
    let store = Arc::new(MemoryStore::new());
    let (adapters, _) = adapters_with(
        Arc::new(FixedExtractor(SOURCE_TEXT.to_string())),
        Arc::new(FixedDetector {
            name: "pii",
            entities: vec![Entity::new("NAME", 0.99, 0, 10_000)],
        }),
        store.clone(),
    );
    let config = RedactionConfig::default();

    let err = process_document(&event(), &adapters, &config)
        .await
        .unwrap_err();
    assert!(matches!(err, RedactError::EntityOutOfBounds { .. }));
    assert_eq!(err.status_code(), 500);
    assert!(store.is_empty());
}

// ── Config interplay ─────────────────────────────────────────────────────────

#[tokio::test]
async fn custom_marker_and_threshold_flow_through() {
    let store = Arc::new(MemoryStore::new());
    let (adapters, _) = happy_adapters(store);
    let config = RedactionConfig::builder()
        .marker("█")
        // Above every detection score: nothing survives the filter.
        .score_threshold(0.99)
        .build()
        .unwrap();

    let output = process_document(&event(), &adapters, &config)
        .await
        .unwrap();
    assert_eq!(output.redacted_text, SOURCE_TEXT);
    assert_eq!(output.stats.entities_redacted, 0);
}
