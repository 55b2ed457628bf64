//! Tafsir translation pipeline.
//!
//! Composes detection, normalization, chunking, per-chunk translation with
//! bounded retry, and post-processing into a single call that always
//! returns a report. A chunk that exhausts its retries contributes a
//! bracketed failure marker in place, so the output keeps its positional
//! integrity and the caller can see exactly what is missing.

use crate::chunk::split_into_chunks;
use crate::config::{JoinMode, TranslationConfig};
use crate::console::Console;
use crate::error::ProviderError;
use crate::language::{self, Detection, Language};
use crate::normalize::normalize;
use crate::postprocess::post_process;
use crate::provider::TranslationProvider;
use crate::retry::RetryPolicy;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;

/// Prefix every failure marker starts with.
pub const FAILURE_MARKER_PREFIX: &str = "[Translation failed";

/// Marker returned when the retry loop exits without a terminal outcome.
const EXHAUSTED_MARKER: &str = "[Translation failed after all retries]";

/// Outcome of translating a single chunk.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkOutcome {
    /// Chunk position, 1-based.
    pub chunk_id: usize,
    /// The normalized source text of this chunk.
    pub original: String,
    /// Translated text, or a failure marker.
    pub translated: String,
    /// False iff `translated` is a failure marker.
    pub success: bool,
}

/// Full result of one translation request.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    /// The raw input text.
    pub original_text: String,
    /// The normalized text that was chunked and translated.
    pub processed_text: String,
    /// Joined and post-processed translation, failure markers included.
    pub translated_text: String,
    /// The resolved source language.
    pub detected_language: Language,
    /// Detection label, including fallback/default markers.
    pub language_label: String,
    /// Detection confidence; 1.0 when the language was supplied manually.
    pub detection_confidence: f64,
    /// Number of chunks submitted to the provider.
    pub total_chunks: usize,
    /// Number of chunks that translated successfully.
    pub successful_chunks: usize,
    /// 1-based ids of chunks whose retries were exhausted.
    pub failed_chunks: Vec<usize>,
    /// Percentage of chunks that succeeded, 0-100.
    pub success_rate: f64,
    /// Per-chunk outcomes, in order.
    pub chunks: Vec<ChunkOutcome>,
    /// RFC 3339 timestamp of when the report was built.
    pub timestamp: String,
}

/// Translator for Arabic/Urdu tafsir text.
pub struct TafsirTranslator {
    /// Provider performing the actual remote calls.
    provider: Box<dyn TranslationProvider>,
    /// Translation behavior configuration.
    config: TranslationConfig,
    /// Retry schedule derived from the configuration.
    retry: RetryPolicy,
    /// Console for progress output.
    console: Console,
}

impl TafsirTranslator {
    /// Creates a new translator around the given provider.
    pub fn new(provider: Box<dyn TranslationProvider>, config: TranslationConfig) -> Self {
        let retry = RetryPolicy::new(
            config.retries,
            Duration::from_secs_f64(config.delay_between_requests_sec),
        );

        Self {
            provider,
            config,
            retry,
            console: Console::new(),
        }
    }

    /// Translates tafsir text into `target`, detecting the source language
    /// when `source` is not supplied.
    ///
    /// Always returns a report: per-chunk failures become markers in the
    /// output rather than errors. Chunks are translated strictly one at a
    /// time, with a delay after every provider round trip.
    pub async fn translate(
        &self,
        input_text: &str,
        source: Option<Language>,
        target: &str,
    ) -> TranslationReport {
        let detection = match source {
            Some(lang) => Detection::manual(lang),
            None => language::detect(input_text),
        };

        let processed_text = normalize(input_text, detection.language);
        let chunks = split_into_chunks(&processed_text, self.config.max_chunk_chars);
        let total_chunks = chunks.len();

        let mut outcomes: Vec<ChunkOutcome> = Vec::with_capacity(total_chunks);
        let mut failed_chunks = Vec::new();

        for (index, chunk) in chunks.into_iter().enumerate() {
            let chunk_id = index + 1;
            self.console
                .progress_update(&format!("Translating chunk {}/{}", chunk_id, total_chunks));

            let translated = self
                .translate_chunk(&chunk, detection.language.code(), target)
                .await;
            let success = !translated.starts_with(FAILURE_MARKER_PREFIX);
            if !success {
                failed_chunks.push(chunk_id);
            }
            outcomes.push(ChunkOutcome {
                chunk_id,
                original: chunk,
                translated,
                success,
            });

            // Blanket rate-limit guard: wait after every chunk, success or
            // not.
            sleep(self.retry.base_delay).await;
        }
        self.console.clear_line();

        let separator = match self.config.join_mode {
            JoinMode::Flow => " ",
            JoinMode::Paragraphs => "\n\n",
        };
        let joined = outcomes
            .iter()
            .map(|o| o.translated.as_str())
            .collect::<Vec<_>>()
            .join(separator);
        let translated_text = post_process(&joined);

        let successful_chunks = total_chunks - failed_chunks.len();

        TranslationReport {
            original_text: input_text.to_string(),
            processed_text,
            translated_text,
            detected_language: detection.language,
            language_label: detection.label,
            detection_confidence: detection.confidence,
            total_chunks,
            successful_chunks,
            failed_chunks,
            success_rate: success_rate(successful_chunks, total_chunks),
            chunks: outcomes,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Translates one chunk, retrying per the policy.
    ///
    /// Returns the trimmed provider output on the first non-blank result.
    /// When the final attempt fails, returns a marker carrying the failure
    /// reason instead of an error.
    async fn translate_chunk(&self, text: &str, source: &str, target: &str) -> String {
        for attempt in 0..self.retry.max_attempts {
            if let Some(delay) = self.retry.backoff_before(attempt) {
                sleep(delay).await;
            }

            let failure = match self.provider.translate(source, target, text).await {
                Ok(result) if !result.trim().is_empty() => return result.trim().to_string(),
                Ok(_) => ProviderError::EmptyResult,
                Err(e) => e,
            };

            if self.retry.is_final_attempt(attempt) {
                return format!("[Translation failed: {}]", failure);
            }

            self.console.warning(&format!(
                "Attempt {}/{} failed ({}), retrying",
                attempt + 1,
                self.retry.max_attempts,
                failure
            ));
            sleep(self.retry.failure_cooldown()).await;
        }

        EXHAUSTED_MARKER.to_string()
    }
}

/// Percentage of successful chunks, 0.0 when there were none at all.
fn success_rate(successful: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        successful as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider stub that always succeeds with a fixed response.
    struct FixedProvider {
        response: String,
        calls: Arc<AtomicUsize>,
    }

    impl FixedProvider {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl TranslationProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn translate(
            &self,
            _source: &str,
            _target: &str,
            _text: &str,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    /// Provider stub that always fails.
    struct FailingProvider {
        calls: Arc<AtomicUsize>,
    }

    impl FailingProvider {
        fn new() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl TranslationProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn translate(
            &self,
            _source: &str,
            _target: &str,
            _text: &str,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::ApiError("stub outage".to_string()))
        }
    }

    /// Provider stub that echoes the chunk back, failing on marked input.
    struct EchoProvider;

    #[async_trait]
    impl TranslationProvider for EchoProvider {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn translate(
            &self,
            _source: &str,
            _target: &str,
            text: &str,
        ) -> Result<String, ProviderError> {
            if text.contains("FAILME") {
                return Err(ProviderError::ApiError("marked input".to_string()));
            }
            Ok(text.to_string())
        }
    }

    /// Config with zeroed delays so tests finish immediately.
    fn test_config() -> TranslationConfig {
        TranslationConfig {
            delay_between_requests_sec: 0.0,
            ..TranslationConfig::default()
        }
    }

    fn translator_with(provider: Box<dyn TranslationProvider>) -> TafsirTranslator {
        TafsirTranslator::new(provider, test_config())
    }

    #[tokio::test]
    async fn test_single_chunk_success() {
        let translator = translator_with(Box::new(FixedProvider::new("  Hello  ")));
        let report = translator
            .translate("مرحبا", Some(Language::Arabic), "en")
            .await;

        assert_eq!(report.translated_text, "Hello");
        assert_eq!(report.total_chunks, 1);
        assert_eq!(report.successful_chunks, 1);
        assert!(report.failed_chunks.is_empty());
        assert_eq!(report.success_rate, 100.0);
        assert!(report.chunks[0].success);
    }

    #[tokio::test]
    async fn test_first_attempt_success_calls_provider_once() {
        let provider = FixedProvider::new("Hello");
        let calls = provider.calls.clone();
        let translator = translator_with(Box::new(provider));

        translator
            .translate("مرحبا", Some(Language::Arabic), "en")
            .await;
        // One chunk, no retries needed.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_exhausts_exact_attempt_count() {
        let provider = FailingProvider::new();
        let calls = provider.calls.clone();
        let translator = translator_with(Box::new(provider));

        let report = translator
            .translate("مرحبا", Some(Language::Arabic), "en")
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(report.failed_chunks, vec![1]);
        assert_eq!(report.successful_chunks, 0);
        assert_eq!(report.success_rate, 0.0);
        assert!(report.translated_text.starts_with(FAILURE_MARKER_PREFIX));
        assert!(report.translated_text.contains("stub outage"));
    }

    #[tokio::test]
    async fn test_blank_response_becomes_failure_marker() {
        let translator = translator_with(Box::new(FixedProvider::new("   ")));
        let report = translator
            .translate("مرحبا", Some(Language::Arabic), "en")
            .await;

        assert_eq!(report.failed_chunks, vec![1]);
        assert!(report.chunks[0].translated.contains("empty result"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_position() {
        // Three ~2000-char words cannot share a sub-unit or a chunk, so
        // each becomes its own chunk and the middle one fails.
        let translator = translator_with(Box::new(EchoProvider));
        let text = format!(
            "{} FAILME{} {}",
            "a".repeat(2000),
            "b".repeat(2000),
            "c".repeat(2000)
        );

        let report = translator
            .translate(&text, Some(Language::Arabic), "en")
            .await;

        assert_eq!(report.total_chunks, 3);
        assert_eq!(report.failed_chunks, vec![2]);
        assert_eq!(report.successful_chunks, 2);
        assert!((report.success_rate - 200.0 / 3.0).abs() < 1e-9);
        // The marker sits between the surrounding translations.
        assert!(report.chunks[0].success);
        assert!(!report.chunks[1].success);
        assert!(report.chunks[2].success);
        assert_eq!(
            report.successful_chunks + report.failed_chunks.len(),
            report.total_chunks
        );
    }

    #[tokio::test]
    async fn test_manual_source_language_skips_detection() {
        let translator = translator_with(Box::new(FixedProvider::new("ok")));
        let report = translator
            .translate("hello english text", Some(Language::Urdu), "en")
            .await;

        assert_eq!(report.detected_language, Language::Urdu);
        assert_eq!(report.detection_confidence, 1.0);
        assert_eq!(report.language_label, "Urdu");
    }

    #[tokio::test]
    async fn test_detection_runs_when_source_missing() {
        let translator = translator_with(Box::new(FixedProvider::new("ok")));
        let report = translator
            .translate("بسم الله الرحمن الرحيم الحمد لله رب العالمين", None, "en")
            .await;

        assert_eq!(report.detected_language, Language::Arabic);
        assert!(report.detection_confidence < 1.0);
    }

    #[tokio::test]
    async fn test_report_carries_normalized_text() {
        let translator = translator_with(Box::new(FixedProvider::new("ok")));
        let report = translator
            .translate("  الآية ٢٥٠  ", Some(Language::Arabic), "en")
            .await;

        assert_eq!(report.original_text, "  الآية ٢٥٠  ");
        assert_eq!(report.processed_text, "الآية 250");
        assert_eq!(report.chunks[0].original, "الآية 250");
    }

    #[test]
    fn test_success_rate_math() {
        assert_eq!(success_rate(0, 0), 0.0);
        assert_eq!(success_rate(0, 4), 0.0);
        assert_eq!(success_rate(2, 4), 50.0);
        assert_eq!(success_rate(4, 4), 100.0);
    }
}
