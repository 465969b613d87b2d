use serde::{Deserialize, Serialize};

// ===== DOMAIN TYPES =====

/// Which kind of session material to generate for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionContentKind {
    Description,
    Quiz,
}

/// One row read off a grade sheet. Notes the model could not find stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note3: Option<f64>,
}

/// Image payload ready to be sent inline: base64 text plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub mime_type: String,
    pub data: String,
}

// ===== HTTP API TYPES =====

#[derive(Debug, Deserialize)]
pub struct SessionContentRequest {
    pub topic: String,
    pub kind: SessionContentKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionContentResponse {
    pub content: String,
}

/// Image upload as produced by `FileReader.readAsDataURL` in the browser.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub image: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NamesResponse {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GradesResponse {
    pub grades: Vec<GradeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
