//! Translation service seam

use async_trait::async_trait;
use thiserror::Error;

/// Why a single leaf translation failed. Never escapes the translator: the
/// leaf keeps its original text instead.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Network-level error during HTTP communication.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    /// Non-2xx HTTP status.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// The service answered but its embedded status was not a success.
    #[error("Translation rejected (status {status}): {message}")]
    Rejected { status: String, message: String },

    #[error("Invalid response from translation service: {0}")]
    InvalidResponse(String),
}

/// Translates one string. One call is one network round trip.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String, TranslateError>;
}
