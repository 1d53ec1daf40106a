use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::resolve_language_code;

use super::Translator;

/// Public web endpoint used by the Google Translate browser widget
const GOOGLE_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate client
#[derive(Debug)]
pub struct GoogleTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a new client against the public endpoint
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoint(GOOGLE_TRANSLATE_ENDPOINT, timeout)
    }

    /// Create a new client against a custom endpoint
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for one line
    fn request_url(&self, text: &str, language_code: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", language_code),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }

    /// Translate a single line
    async fn translate_line(&self, text: &str, language_code: &str) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let url = self.request_url(text, language_code)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to reach Google Translate: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        parse_response(&body)
    }
}

/// Extract the translated text from a `translate_a/single` response.
///
/// The body is a nested array whose first element lists translated segments;
/// each segment's first element is the translated text.
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Invalid JSON: {}", e)))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google_api"
    }

    async fn translate(&self, lines: &[String], target_language: &str) -> Result<Vec<String>, ProviderError> {
        let language_code = resolve_language_code(target_language)
            .map_err(|_| ProviderError::UnsupportedLanguage(target_language.to_string()))?;

        debug!("Translating {} line(s) to {} via Google", lines.len(), language_code);

        // try_join_all keeps results in input order
        try_join_all(lines.iter().map(|line| self.translate_line(line, &language_code))).await
    }
}
