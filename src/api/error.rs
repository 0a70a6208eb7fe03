#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Session is not authenticated.")]
    Unauthorized,

    #[error("Validation failed: {}", messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("Server error: {message}")]
    Server { message: String },

    #[error("Unexpected HTTP status {status}.")]
    UnexpectedStatus { status: u16 },

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to parse API response: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

impl ApiError {
    /// Message shown to the user, falling back to a context-specific generic
    /// string when the server gave nothing usable.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation { messages } => messages.join(", "),
            ApiError::Server { message } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestFailed(Box::new(e))
    }
}
