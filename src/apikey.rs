use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::error::{Result, TrackingError};

/// Header carrying the account key
pub const API_KEY_HEADER: &str = "Trackingmore-Api-Key";

/// Conventional AJAX marker the service expects
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";

/// ApiKey holds the account key and the request headers derived from it.
#[derive(Clone)]
pub struct ApiKey {
    key: String,
    headers: HeaderMap,
}

impl ApiKey {
    /// Create a new ApiKey and derive its headers
    ///
    /// # Arguments
    /// * `key` - The TrackingMore account API key
    pub fn new(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(TrackingError::InvalidArgument(
                "API key must not be empty".to_string(),
            ));
        }

        let mut value = HeaderValue::from_str(key).map_err(|_| {
            TrackingError::InvalidArgument("API key contains invalid header characters".to_string())
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("trackingmore-api-key"), value);
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        Ok(ApiKey {
            key: key.to_string(),
            headers,
        })
    }

    /// The raw key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Headers sent with every request
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

// Implement Debug manually to avoid exposing the key
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &"<redacted>")
            .finish()
    }
}
