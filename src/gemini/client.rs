use async_trait::async_trait;
use tracing::debug;

use super::parsing::{response_text, truncate_for_log, GenerateContentBody, GeminiResponse};
use super::{GenerateRequest, GenerativeModel};
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::ModelError;

/// reqwest-backed client for the Gemini REST API.
///
/// The key travels as the `key` query parameter, so transport errors are
/// stripped of their URL before they can reach a log line.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.api_key.clone(), config.base_url.clone())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<Option<String>, ModelError> {
        debug!(
            model = %request.model,
            parts = request.parts.len(),
            schema = request.response_schema.is_some(),
            "🔄 Calling Gemini"
        );

        let body = GenerateContentBody::from_request(&request);

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.without_url()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ModelError::Api {
                status,
                body: truncate_for_log(&error_text, 200),
            });
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.without_url().to_string()))?;

        if let Some(reason) = gemini_response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            debug!(finish_reason = reason, "✅ Gemini response");
        }

        Ok(response_text(&gemini_response))
    }
}
