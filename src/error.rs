use thiserror::Error;

/// Main error type for TrackingMore API operations
#[derive(Debug, Error)]
pub enum TrackingError {
    /// A request was issued before an API key was installed
    #[error("API key not set: call set_api_key before issuing requests")]
    Configuration,

    /// The transport answered with a non-success HTTP status
    #[error("HTTP error {status}: {body}")]
    Transport { status: u16, body: String },

    /// The round trip failed below the HTTP status level (DNS, TLS, timeout...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered but reported a failure in its `meta` envelope
    #[error("TrackingMore API error {code} ({error_type}): {message}")]
    Api {
        code: i64,
        error_type: String,
        message: String,
    },

    /// A caller-supplied argument failed local validation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl TrackingError {
    /// Create a new transport error
    pub fn transport(status: u16, body: String) -> Self {
        TrackingError::Transport { status, body }
    }

    /// Check if this error comes from a missing API key
    pub fn is_configuration(&self) -> bool {
        matches!(self, TrackingError::Configuration)
    }

    /// Check if the HTTP round trip itself failed
    pub fn is_transport(&self) -> bool {
        matches!(self, TrackingError::Transport { .. } | TrackingError::Network(_))
    }

    /// Get the `meta.code` if this is an API error
    pub fn api_code(&self) -> Option<i64> {
        match self {
            TrackingError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the transport status code, if one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TrackingError::Transport { status, .. } => Some(*status),
            TrackingError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for TrackingMore operations
pub type Result<T> = std::result::Result<T, TrackingError>;
