//! Gemini `generateContent` plumbing.
//!
//! [`GenerativeModel`] is the seam the adapter talks to; [`GeminiClient`] is
//! the reqwest implementation against the public REST endpoint.

mod client;
mod parsing;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ModelError;
use crate::models::MediaBlob;

pub use client::GeminiClient;
pub use parsing::{response_text, GeminiResponse};

/// One piece of prompt content.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

/// A single-turn request: ordered parts, plus an optional JSON response schema.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub parts: Vec<Part>,
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: vec![Part::Text(prompt.into())],
            response_schema: None,
        }
    }

    /// Image part first, then the instruction text.
    pub fn with_image(model: impl Into<String>, image: &MediaBlob, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: vec![
                Part::InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
                Part::Text(prompt.into()),
            ],
            response_schema: None,
        }
    }

    /// Constrain the response to JSON matching `schema`.
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one request. `Ok(None)` means the model answered without any text.
    async fn generate_content(&self, request: GenerateRequest) -> Result<Option<String>, ModelError>;
}
