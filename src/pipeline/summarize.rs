//! Summarizer invocation glue.
//!
//! Intentionally thin: prompt text lives in [`crate::prompts`] and the model
//! call behind [`crate::adapters::Summarizer`], so prompt changes never touch
//! invocation logic and vice versa.

use crate::adapters::Summarizer;
use crate::config::RedactionConfig;
use crate::error::RedactError;
use crate::prompts::summary_prompt;
use std::sync::Arc;
use tracing::debug;

/// Ask the summarizer what was redacted and why.
///
/// The prompt only ever contains already-redacted text; the raw extracted
/// text must never reach the model.
pub async fn summarize_redactions(
    summarizer: &Arc<dyn Summarizer>,
    redacted_text: &str,
    config: &RedactionConfig,
) -> Result<String, RedactError> {
    let prompt = summary_prompt(redacted_text);
    debug!(
        model_id = %config.model_id,
        temperature = config.temperature,
        prompt_chars = prompt.len(),
        "invoking summarizer"
    );
    summarizer
        .summarize(&prompt, &config.model_id, config.temperature)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Captures the arguments it was called with.
    struct Recording {
        calls: Mutex<Vec<(String, String, f32)>>,
    }

    #[async_trait]
    impl Summarizer for Recording {
        async fn summarize(
            &self,
            prompt: &str,
            model_id: &str,
            temperature: f32,
        ) -> Result<String, RedactError> {
            self.calls.lock().unwrap().push((
                prompt.to_string(),
                model_id.to_string(),
                temperature,
            ));
            Ok("* something was redacted".to_string())
        }
    }

    #[tokio::test]
    async fn passes_configured_model_and_temperature() {
        let rec = Arc::new(Recording {
            calls: Mutex::new(Vec::new()),
        });
        let summarizer: Arc<dyn Summarizer> = rec.clone();
        let config = RedactionConfig::default();

        let out = summarize_redactions(&summarizer, "Patient [REDACTED].", &config)
            .await
            .unwrap();
        assert_eq!(out, "* something was redacted");

        let calls = rec.calls.lock().unwrap();
        let (prompt, model, temp) = &calls[0];
        assert!(prompt.contains("Patient [REDACTED]."));
        assert_eq!(model, "meta.llama3-8b-instruct-v1:0");
        assert_eq!(*temp, 0.1);
    }
}
