//! Client-side submit-and-poll flow.
//!
//! The client uploads a source document and then has no completion signal to
//! subscribe to, so it polls: a fixed-interval existence check on the
//! derived output key, up to a fixed attempt budget. Exhausting the budget
//! is a timeout, not a cancellation — processing continues server-side and
//! the caller is told to check back later via
//! [`PollOutcome::StillProcessing`], never an error.
//!
//! Interval and budget come from [`RedactionConfig`] (defaults 1 s × 60)
//! rather than being baked in, so deployments with slow extractors can widen
//! the window without a rebuild.

use crate::adapters::ObjectStore;
use crate::config::RedactionConfig;
use crate::error::RedactError;
use crate::process::derive_output_key;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// What the client poller observed within its attempt budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The redacted counterpart exists; `bytes` is the rendered output
    /// document, to be served as `application/pdf`.
    Ready { key: String, bytes: Vec<u8> },
    /// The attempt budget ran out before the output appeared. Non-fatal;
    /// the document may still be processing.
    StillProcessing { key: String, attempts: u32 },
}

/// Upload `bytes` under `filename` and poll for the redacted counterpart.
///
/// # Errors
/// Storage failures (upload, existence check, download) propagate as
/// [`RedactError`]; a timeout does not.
pub async fn submit_and_poll(
    store: &Arc<dyn ObjectStore>,
    config: &RedactionConfig,
    filename: &str,
    bytes: Vec<u8>,
) -> Result<PollOutcome, RedactError> {
    store.put(&config.input_bucket, filename, bytes).await?;
    info!(
        bucket = %config.input_bucket,
        key = %filename,
        "uploaded source document"
    );

    let output_key = derive_output_key(filename, &config.output_suffix);
    poll_for_output(store, config, &output_key).await
}

/// Poll for an already-derived output key. Split from [`submit_and_poll`] so
/// a client can resume waiting for a previously submitted document.
pub async fn poll_for_output(
    store: &Arc<dyn ObjectStore>,
    config: &RedactionConfig,
    output_key: &str,
) -> Result<PollOutcome, RedactError> {
    for attempt in 1..=config.poll_max_attempts {
        if store.exists(&config.output_bucket, output_key).await? {
            let bytes = store.get(&config.output_bucket, output_key).await?;
            info!(key = %output_key, attempt, "redacted document ready");
            return Ok(PollOutcome::Ready {
                key: output_key.to_string(),
                bytes,
            });
        }
        debug!(key = %output_key, attempt, "output not present yet");
        if attempt < config.poll_max_attempts {
            sleep(config.poll_interval).await;
        }
    }

    warn!(
        key = %output_key,
        attempts = config.poll_max_attempts,
        "gave up waiting; document may still be processing"
    );
    Ok(PollOutcome::StillProcessing {
        key: output_key.to_string(),
        attempts: config.poll_max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use std::time::Duration;

    fn test_config(attempts: u32) -> RedactionConfig {
        RedactionConfig::builder()
            .poll_interval(Duration::from_secs(1))
            .poll_max_attempts(attempts)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn ready_immediately_downloads_bytes() {
        let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::new());
        let config = test_config(3);
        store
            .put(&config.output_bucket, "scan_redacted.pdf", b"%PDF out".to_vec())
            .await
            .unwrap();

        let outcome = submit_and_poll(&store, &config, "scan.pdf", b"%PDF in".to_vec())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            PollOutcome::Ready {
                key: "scan_redacted.pdf".into(),
                bytes: b"%PDF out".to_vec(),
            }
        );
        // The upload itself landed in the input bucket.
        assert!(store
            .exists(&config.input_bucket, "scan.pdf")
            .await
            .unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn ready_after_a_few_attempts() {
        let mem = Arc::new(MemoryStore::new());
        let store: Arc<dyn ObjectStore> = mem.clone();
        let config = test_config(10);

        let writer = {
            let store = store.clone();
            let bucket = config.output_bucket.clone();
            tokio::spawn(async move {
                sleep(Duration::from_millis(2500)).await;
                store
                    .put(&bucket, "scan_redacted.pdf", b"done".to_vec())
                    .await
                    .unwrap();
            })
        };

        let outcome = poll_for_output(&store, &config, "scan_redacted.pdf")
            .await
            .unwrap();
        writer.await.unwrap();

        match outcome {
            PollOutcome::Ready { bytes, .. } => assert_eq!(bytes, b"done"),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn budget_exhaustion_is_still_processing_not_error() {
        let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::new());
        let config = test_config(5);

        let outcome = poll_for_output(&store, &config, "never_redacted.pdf")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            PollOutcome::StillProcessing {
                key: "never_redacted.pdf".into(),
                attempts: 5,
            }
        );
    }
}
