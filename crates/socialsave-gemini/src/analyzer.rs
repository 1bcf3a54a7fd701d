//! One-shot post analysis: prompt, single model call, normalization.

use socialsave_core::{detect_platform, AppConfig, Post};

use crate::client::{ClientOptions, GeminiClient};
use crate::error::AnalysisError;
use crate::normalize::normalize_reply;
use crate::prompt::build_analysis_prompt;

/// Turns a post URL into a [`Post`] with one Gemini round-trip.
///
/// Holds no mutable state; callers decide what to do with the result
/// (typically recording it in the history cache).
pub struct Analyzer {
    client: GeminiClient,
    thumbnail_base: String,
}

impl Analyzer {
    #[must_use]
    pub fn new(client: GeminiClient, thumbnail_base: impl Into<String>) -> Self {
        Self {
            client,
            thumbnail_base: thumbnail_base.into(),
        }
    }

    /// Build an analyzer from application config.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingApiKey`] when no key is configured,
    /// before any client or network activity, and
    /// [`AnalysisError::Misconfigured`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .ok_or(AnalysisError::MissingApiKey)?;

        let options = ClientOptions {
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        };
        let client = GeminiClient::with_options(api_key, &options).map_err(|e| match e {
            crate::error::GeminiError::Http(inner) => {
                AnalysisError::Misconfigured(format!("could not build HTTP client: {inner}"))
            }
            other => AnalysisError::from(other),
        })?;

        Ok(Self::new(client, config.thumbnail_base_url.clone()))
    }

    /// Analyze `url` and return a fully populated [`Post`].
    ///
    /// Exactly one outbound request is made; failures are not retried.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidRequest`] for a blank URL (no request is sent)
    ///   or when the service rejects the request.
    /// - [`AnalysisError::Inaccessible`] on network or service failure.
    /// - [`AnalysisError::MalformedResponse`] when the reply is not a JSON object.
    pub async fn analyze(&self, url: &str) -> Result<Post, AnalysisError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "URL must not be empty".to_string(),
            ));
        }

        let platform = detect_platform(url);
        tracing::info!(url, %platform, model = self.client.model(), "analyzing post");

        let prompt = build_analysis_prompt(url);
        let reply = match self.client.generate_with_search(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(url, error = %e, "Gemini request failed");
                return Err(e.into());
            }
        };

        let post = normalize_reply(&reply, url, &self.thumbnail_base)?;
        tracing::info!(
            url,
            id = %post.id,
            media_type = %post.media_type,
            has_media_url = post.media_url.is_some(),
            "post analyzed"
        );
        Ok(post)
    }
}
