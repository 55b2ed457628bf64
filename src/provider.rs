//! Translation provider boundary and the Google Translate implementation.
//!
//! The pipeline treats translation as a best-effort remote call behind the
//! [`TranslationProvider`] trait; retry and failure handling live in the
//! caller. The single concrete implementation talks to the public Google
//! Translate endpoint.

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Trait for translation providers.
///
/// A provider converts one piece of text between two ISO 639-1 language
/// codes. Calls may fail or return garbage at any time; callers must not
/// assume idempotence.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Returns the human-readable name of this provider.
    fn name(&self) -> &'static str;

    /// Translates `text` from `source` to `target`.
    async fn translate(
        &self,
        source: &str,
        target: &str,
        text: &str,
    ) -> Result<String, ProviderError>;
}

/// Provider backed by the public Google Translate web endpoint.
pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: &ProviderConfig) -> Self {
        let client = create_http_client(Duration::from_secs(config.timeout_sec))
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &'static str {
        "Google Translate"
    }

    async fn translate(
        &self,
        source: &str,
        target: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let translated = extract_translation(&payload)?;
        if translated.trim().is_empty() {
            return Err(ProviderError::EmptyResult);
        }

        Ok(translated)
    }
}

/// Concatenates the translated segments of a `translate_a/single` payload.
///
/// The payload is a nested array shaped like
/// `[[["translated", "original", ...], ...], ...]`; segment texts sit at
/// index 0 of each inner array.
fn extract_translation(payload: &Value) -> Result<String, ProviderError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("missing segment list in response".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(part);
        }
    }

    Ok(translated)
}

/// Common HTTP client configuration for translation requests.
fn create_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_single_segment() {
        let payload = json!([[["Hello", "مرحبا", null, null]], null, "ar"]);
        assert_eq!(extract_translation(&payload).unwrap(), "Hello");
    }

    #[test]
    fn test_extract_concatenates_segments() {
        let payload = json!([
            [
                ["In the name of God, ", "بسم الله", null],
                ["the Most Merciful.", "الرحمن الرحيم", null]
            ],
            null,
            "ar"
        ]);
        assert_eq!(
            extract_translation(&payload).unwrap(),
            "In the name of God, the Most Merciful."
        );
    }

    #[test]
    fn test_extract_skips_non_text_segments() {
        let payload = json!([[["Hello", "مرحبا"], [null, null, 3]], null]);
        assert_eq!(extract_translation(&payload).unwrap(), "Hello");
    }

    #[test]
    fn test_extract_rejects_malformed_payload() {
        assert!(extract_translation(&json!({"error": "nope"})).is_err());
        assert!(extract_translation(&json!("just a string")).is_err());
        assert!(extract_translation(&json!(null)).is_err());
    }

    #[test]
    fn test_extract_empty_segment_list() {
        let payload = json!([[], null, "ar"]);
        assert_eq!(extract_translation(&payload).unwrap(), "");
    }

    #[test]
    fn test_default_client_builds() {
        assert!(create_http_client(Duration::from_secs(30)).is_ok());
    }
}
