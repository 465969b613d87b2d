//! The content adapter: prompt in, application values out.
//!
//! The three operations deliberately fail in different ways. Session content
//! degrades to a sentinel string, name extraction returns a fixed-message
//! error, and grade extraction does the same but lets JSON parse failures
//! through as [`AdapterError::Parse`].

mod media;
mod prompts;

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::DEFAULT_MODEL;
use crate::error::AdapterError;
use crate::gemini::{GenerateRequest, GenerativeModel};
use crate::models::{GradeRecord, MediaBlob, SessionContentKind};

pub use media::{strip_data_url_prefix, MAX_INLINE_BYTES};
#[cfg(test)]
pub(crate) use media::oversized_png;
pub use prompts::{build_session_prompt, GRADES_PROMPT, NAMES_PROMPT};

pub const NO_CONTENT_FALLBACK: &str = "No content generated.";
pub const CONTENT_FAILURE_MESSAGE: &str = "Failed to generate content. Please check your API key.";

static GRADES_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "note1": {"type": "NUMBER"},
                "note2": {"type": "NUMBER"},
                "note3": {"type": "NUMBER"}
            },
            "propertyOrdering": ["name", "note1", "note2", "note3"],
            "required": ["name"]
        }
    })
});

/// Response schema sent with grade extraction requests.
pub fn grades_schema() -> &'static Value {
    &GRADES_SCHEMA
}

#[derive(Clone)]
pub struct ContentAdapter {
    model: Arc<dyn GenerativeModel>,
    model_id: String,
}

impl ContentAdapter {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self::with_model_id(model, DEFAULT_MODEL)
    }

    pub fn with_model_id(model: Arc<dyn GenerativeModel>, model_id: impl Into<String>) -> Self {
        Self {
            model,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Free-text session material. Never fails: errors become a fixed message.
    pub async fn generate_session_content(&self, topic: &str, kind: SessionContentKind) -> String {
        let prompt = build_session_prompt(topic, kind);
        info!(topic, kind = ?kind, "📝 Generating session content");

        match self
            .model
            .generate_content(GenerateRequest::text(&self.model_id, prompt))
            .await
        {
            Ok(Some(text)) => text,
            Ok(None) => NO_CONTENT_FALLBACK.to_string(),
            Err(e) => {
                error!("❌ Gemini API Error: {}", e);
                CONTENT_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// One name per non-blank line of the model's answer, in order.
    pub async fn extract_student_names_from_image(&self, image: &MediaBlob) -> Result<Vec<String>, AdapterError> {
        info!(mime = %image.mime_type, "🖼️  Extracting student names");

        let request = GenerateRequest::with_image(&self.model_id, image, NAMES_PROMPT);
        let text = self.model.generate_content(request).await.map_err(|e| {
            error!("❌ Gemini Vision Error: {}", e);
            AdapterError::NameExtraction
        })?;

        Ok(parse_names(text.as_deref().unwrap_or_default()))
    }

    /// Grade rows, constrained by [`grades_schema`]. An empty answer is an empty list.
    pub async fn extract_grades_from_image(&self, image: &MediaBlob) -> Result<Vec<GradeRecord>, AdapterError> {
        info!(mime = %image.mime_type, "🖼️  Extracting grades");

        let request = GenerateRequest::with_image(&self.model_id, image, GRADES_PROMPT)
            .with_response_schema(grades_schema().clone());
        let text = self.model.generate_content(request).await.map_err(|e| {
            error!("❌ Gemini Grade Extraction Error: {}", e);
            AdapterError::GradeExtraction
        })?;

        match text {
            Some(text) => parse_grades(&text),
            None => Ok(Vec::new()),
        }
    }
}

fn parse_names(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn parse_grades(text: &str) -> Result<Vec<GradeRecord>, AdapterError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(text.trim())?)
}
