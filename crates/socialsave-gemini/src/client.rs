//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with API key handling, the search-tool request shape, and
//! typed response decoding. Non-2xx statuses surface as
//! [`GeminiError::Status`] carrying the API's own error message when present.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Settings for building a [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub model: String,
    pub base_url: String,
    /// Overall request timeout. `None` leaves the transport's own limits in charge.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: "socialsave/0.1 (post-archiver)".to_string(),
        }
    }
}

/// Client for the Gemini REST API.
///
/// Built with [`GeminiClient::with_options`]; [`ClientOptions::default`]
/// targets the production API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    /// Creates a client with explicit model, base URL, and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeminiError::InvalidBaseUrl`] if
    /// `options.base_url` does not parse.
    pub fn with_options(api_key: &str, options: &ClientOptions) -> Result<Self, GeminiError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str());
        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", options.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            base_url: options.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: options.model.clone(),
            base_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` as a single user turn with the `google_search` tool
    /// enabled and returns the text of the first candidate.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Status`] on a non-2xx response.
    /// - [`GeminiError::Deserialize`] if the envelope does not match the
    ///   expected shape.
    /// - [`GeminiError::EmptyResponse`] if the first candidate has no text.
    pub async fn generate_with_search(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = self.endpoint_url()?;
        let request = GenerateContentRequest::with_search(prompt);

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        parsed.first_text().ok_or_else(|| GeminiError::EmptyResponse {
            finish_reason: parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "none".to_string()),
        })
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    fn endpoint_url(&self) -> Result<Url, GeminiError> {
        let path = format!("v1beta/models/{}:generateContent", self.model);
        self.base_url
            .join(&path)
            .map_err(|e| GeminiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Pulls `error.message` out of an error body, falling back to the raw
    /// body (truncated) when it is not the usual envelope.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.status {
                Some(status) if !envelope.error.message.is_empty() => {
                    format!("{status}: {}", envelope.error.message)
                }
                Some(status) => status,
                None => envelope.error.message,
            },
            Err(_) => body.chars().take(200).collect(),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
