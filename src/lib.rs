//! Backend for the PE session assistant: prompts Gemini for session
//! material and reads student names and grades off photographed sheets.

pub mod adapter;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod routes;

pub use adapter::ContentAdapter;
pub use config::Config;
pub use error::{AdapterError, ModelError};
pub use gemini::{GeminiClient, GenerateRequest, GenerativeModel};
pub use models::{GradeRecord, MediaBlob, SessionContentKind};
