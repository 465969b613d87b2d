use anyhow::{Context, Result};
use tracing::error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Empty when no key was configured; calls then fail at the remote endpoint.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub port: u16,
}

impl Config {
    /// Load from the process environment. Call `dotenv::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = match non_empty("GEMINI_API_KEY").or_else(|| non_empty("VITE_GEMINI_API_KEY")) {
            Some(key) => key,
            None => {
                error!("❌ GEMINI_API_KEY is missing. Please add it to your environment variables.");
                String::new()
            }
        };

        let model = non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = non_empty("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            port,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
