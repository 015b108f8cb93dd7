//! Configuration for document redaction.
//!
//! Every policy knob lives in one [`RedactionConfig`] built via its
//! [`RedactionConfigBuilder`]. Keeping the knobs together makes a run's
//! behaviour serialisable for logging and easy to diff between two runs.
//!
//! The defaults reproduce the production policy: confidence threshold 0.8,
//! marker `[REDACTED]`, summarizer temperature 0.1, and a 60 × 1 s polling
//! budget on the client side. Polling interval and attempts are deliberately
//! configuration rather than constants so a deployment can tune them without
//! a rebuild.

use crate::error::RedactError;
use serde::Serialize;
use std::time::Duration;

/// Default minimum confidence a detected entity must *exceed* to be redacted.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.8;

/// Default marker substituted for each redacted span.
pub const DEFAULT_MARKER: &str = "[REDACTED]";

/// Configuration for the redaction pipeline and client poller.
///
/// Built via [`RedactionConfig::builder()`] or [`RedactionConfig::default()`].
///
/// # Example
/// ```rust
/// use medredact::RedactionConfig;
///
/// let config = RedactionConfig::builder()
///     .score_threshold(0.9)
///     .poll_max_attempts(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RedactionConfig {
    /// Minimum confidence score an entity must exceed (strict `>`) to be
    /// redacted. Range: 0–1. Default: 0.8.
    ///
    /// Applied identically to both detection vocabularies. The comparison is
    /// strict: an entity scored exactly at the threshold is *not* redacted.
    pub score_threshold: f32,

    /// Marker token substituted for each redacted span. Default: `[REDACTED]`.
    ///
    /// Overlapping detections collapse into a single marker, so the output
    /// never contains nested or doubled markers.
    pub marker: String,

    /// Summarization model identifier. Default: `meta.llama3-8b-instruct-v1:0`.
    pub model_id: String,

    /// Sampling temperature for the summarizer. Default: 0.1.
    ///
    /// Kept low so the summary of what was redacted is reproducible run to
    /// run; creativity is a liability when describing redactions.
    pub temperature: f32,

    /// Bucket the client uploads source documents into.
    /// Default: `medical-non-redacted-documents`.
    pub input_bucket: String,

    /// Bucket the orchestrator writes redacted documents into.
    /// Default: `medical-redacted-documents`.
    pub output_bucket: String,

    /// Suffix replacing `.pdf` when deriving the output key.
    /// Default: `_redacted.pdf`.
    pub output_suffix: String,

    /// Delay between the client poller's existence checks. Default: 1 s.
    #[serde(with = "duration_secs")]
    pub poll_interval: Duration,

    /// Number of existence checks before the poller reports
    /// "still processing". Default: 60.
    pub poll_max_attempts: u32,
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            marker: DEFAULT_MARKER.to_string(),
            model_id: "meta.llama3-8b-instruct-v1:0".to_string(),
            temperature: 0.1,
            input_bucket: "medical-non-redacted-documents".to_string(),
            output_bucket: "medical-redacted-documents".to_string(),
            output_suffix: "_redacted.pdf".to_string(),
            poll_interval: Duration::from_secs(1),
            poll_max_attempts: 60,
        }
    }
}

impl RedactionConfig {
    /// Create a new builder for `RedactionConfig`.
    pub fn builder() -> RedactionConfigBuilder {
        RedactionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RedactionConfig`].
#[derive(Debug)]
pub struct RedactionConfigBuilder {
    config: RedactionConfig,
}

impl RedactionConfigBuilder {
    pub fn score_threshold(mut self, t: f32) -> Self {
        self.config.score_threshold = t;
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.config.marker = marker.into();
        self
    }

    pub fn model_id(mut self, id: impl Into<String>) -> Self {
        self.config.model_id = id.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn input_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.input_bucket = bucket.into();
        self
    }

    pub fn output_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.output_bucket = bucket.into();
        self
    }

    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.output_suffix = suffix.into();
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn poll_max_attempts(mut self, attempts: u32) -> Self {
        self.config.poll_max_attempts = attempts.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RedactionConfig, RedactError> {
        let c = &self.config;
        if !(0.0..=1.0).contains(&c.score_threshold) {
            return Err(RedactError::InvalidConfig(format!(
                "score_threshold must be in [0, 1], got {}",
                c.score_threshold
            )));
        }
        if c.marker.is_empty() {
            return Err(RedactError::InvalidConfig(
                "marker must not be empty".into(),
            ));
        }
        if c.input_bucket.is_empty() || c.output_bucket.is_empty() {
            return Err(RedactError::InvalidConfig(
                "bucket names must not be empty".into(),
            ));
        }
        if c.poll_max_attempts == 0 {
            return Err(RedactError::InvalidConfig(
                "poll_max_attempts must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
