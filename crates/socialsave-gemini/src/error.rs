use thiserror::Error;

/// Transport-level errors from the Gemini client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The first candidate carried no text (blocked or empty generation).
    #[error("Gemini response contained no text (finish reason: {finish_reason})")]
    EmptyResponse { finish_reason: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// User-facing failures of a post analysis.
///
/// The `Display` text of each variant is the message shown to the user.
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No API key configured. Raised before any network call.
    #[error("API key is missing. Set GEMINI_API_KEY to enable analysis.")]
    MissingApiKey,

    /// The client could not be built from the configured settings.
    #[error("Analysis is misconfigured: {0}")]
    Misconfigured(String),

    /// Network failure, service failure, or the post could not be reached.
    #[error("Could not extract data. The post might be private or inaccessible.")]
    Inaccessible,

    /// The model's reply was not a JSON object.
    #[error("Invalid response format from the AI service. Please try again.")]
    MalformedResponse,

    /// The input URL or request was rejected.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<GeminiError> for AnalysisError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Status {
                status: 400,
                message,
            } => AnalysisError::InvalidRequest(message),
            GeminiError::InvalidBaseUrl { base_url, reason } => {
                AnalysisError::Misconfigured(format!("invalid base URL '{base_url}': {reason}"))
            }
            GeminiError::Deserialize { .. } | GeminiError::EmptyResponse { .. } => {
                AnalysisError::MalformedResponse
            }
            GeminiError::Http(_) | GeminiError::Status { .. } => AnalysisError::Inaccessible,
        }
    }
}
