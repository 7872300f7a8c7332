//! MyMemory translation API client
//!
//! One unauthenticated GET per string:
//! `GET {base}?q=<text>&langpair=<source>|<target>`
//!
//! Success is signalled inside the body (`responseStatus == 200`), not by the
//! HTTP status alone. No retries and no backoff: a failed string simply stays
//! untranslated.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::backend::{TranslateError, TranslationBackend};

pub const DEFAULT_BASE_URL: &str = "https://api.mymemory.translated.net/get";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
    /// Number on success, sometimes a string ("403") on errors
    #[serde(rename = "responseStatus", default)]
    response_status: Value,
    #[serde(rename = "responseDetails", default)]
    response_details: Value,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemoryClient {
    pub fn new() -> Result<Self, TranslateError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TranslateError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point at a different endpoint (tests, self-hosted mirror).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn status_code(status: &Value) -> Option<i64> {
    match status {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_body(body: &str) -> Result<String, TranslateError> {
    let response: MyMemoryResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    if status_code(&response.response_status) != Some(200) {
        let message = match &response.response_details {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        return Err(TranslateError::Rejected {
            status: response.response_status.to_string(),
            message,
        });
    }

    response
        .response_data
        .and_then(|d| d.translated_text)
        .ok_or_else(|| TranslateError::InvalidResponse("missing responseData.translatedText".into()))
}

#[async_trait]
impl TranslationBackend for MyMemoryClient {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String, TranslateError> {
        let langpair = format!("{}|{}", source_lang, target_lang);
        tracing::trace!("MyMemory request langpair={} chars={}", langpair, text.chars().count());

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else {
                    TranslateError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}
