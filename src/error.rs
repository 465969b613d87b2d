use thiserror::Error;

/// Failures talking to the generative model endpoint.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to deserialize: {0}")]
    Decode(String),
}

/// Errors surfaced by the content adapter and the HTTP layer.
///
/// Session content generation never returns one of these; it degrades to a
/// sentinel string instead.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Failed to extract names from image. Please check your API key.")]
    NameExtraction,

    #[error("Failed to extract grades from image.")]
    GradeExtraction,

    /// Grade response text that is present but not valid JSON of the expected shape.
    #[error("failed to parse grade response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid image: {0}")]
    InvalidMedia(String),

    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}
