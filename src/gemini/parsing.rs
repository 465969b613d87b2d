use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GenerateRequest, Part};

// ===== REQUEST STRUCTURES =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentBody<'a> {
    pub contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct WireContent<'a> {
    pub role: &'static str,
    pub parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: WireBlob<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireBlob<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfig<'a> {
    pub response_mime_type: &'static str,
    pub response_schema: &'a Value,
}

impl<'a> GenerateContentBody<'a> {
    pub fn from_request(request: &'a GenerateRequest) -> Self {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text },
                Part::InlineData { mime_type, data } => WirePart::InlineData {
                    inline_data: WireBlob { mime_type, data },
                },
            })
            .collect();

        Self {
            contents: vec![WireContent { role: "user", parts }],
            generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        }
    }
}

// ===== RESPONSE STRUCTURES =====

#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thought: Option<bool>,
}

// ===== RESPONSE EXTRACTORS =====

/// Concatenated text of the first candidate, skipping thought parts.
/// `None` when there is no candidate or the text is empty.
pub fn response_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;

    let text: String = content
        .parts
        .iter()
        .filter(|part| part.thought != Some(true))
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ===== HELPERS =====

/// Truncate text for logging
pub(crate) fn truncate_for_log(text: &str, max_len: usize) -> String {
    let clean_text = text.replace('\n', " ");
    if clean_text.chars().count() <= max_len {
        clean_text
    } else {
        let head: String = clean_text.chars().take(max_len).collect();
        format!("{}...", head)
    }
}
