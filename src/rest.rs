use crate::apikey::ApiKey;
use crate::client::{create_rest_client, Config};
use crate::error::{Result, TrackingError};
use crate::response::{check_envelope, Response};
use reqwest::blocking::Client;
use reqwest::Method;
use serde::Serialize;
use url::Url;

/// Environment variable holding the account key
pub const ENV_API_KEY: &str = "TRACKINGMORE_API_KEY";

/// Context for TrackingMore API requests.
///
/// Each context owns its configuration and session, so independently
/// configured contexts can be used side by side. Request methods take
/// `&self` and never mutate the context.
#[derive(Debug, Clone)]
pub struct TrackingContext {
    /// HTTP client
    pub client: Client,
    /// Configuration
    pub config: Config,
    /// Active API key, unset until `set_api_key` succeeds
    api_key: Option<ApiKey>,
}

impl TrackingContext {
    /// Create a new context with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a new context with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(TrackingContext {
            client: create_rest_client(&config)?,
            config,
            api_key: None,
        })
    }

    /// Create a context from `TRACKINGMORE_BASE_URL` and, when present,
    /// `TRACKINGMORE_API_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ctx = Self::with_config(Config::from_lookup(&lookup)?)?;
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            ctx.set_api_key(&key)?;
        }
        Ok(ctx)
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: &str) -> Result<Self> {
        self.set_api_key(key)?;
        Ok(self)
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Install the API key and derive the request headers from it.
    ///
    /// May be called any number of times; the last successful call wins.
    /// An invalid key leaves the previous session in place.
    pub fn set_api_key(&mut self, key: &str) -> Result<()> {
        self.api_key = Some(ApiKey::new(key)?);
        tracing::debug!("API key installed");
        Ok(())
    }

    /// Whether an API key has been installed
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Return the active API key, or fail if none was ever set
    pub fn require_configured(&self) -> Result<&ApiKey> {
        self.api_key.as_ref().ok_or(TrackingError::Configuration)
    }

    /// Make an API request and unmarshal the response data into the target type
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API endpoint path, relative to the base URL
    /// * `body` - JSON body, if any
    ///
    /// # Returns
    /// The unmarshaled `data` section of the response
    pub fn apply<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.do_request(method, path, body)?;
        response.apply()
    }

    /// Execute an API request and return the checked envelope
    pub fn do_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, None::<&()>, body)
    }

    /// GET with query parameters, returning the unmarshaled `data` section
    pub fn apply_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(Method::GET, path, Some(query), None::<&()>)?;
        response.apply()
    }

    fn send<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Response>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let api_key = self.require_configured()?;

        let url = Url::parse(&format!("{}{}", self.config.base_url(), path))?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(api_key.headers().clone());

        if let Some(query) = query {
            request = request.query(query);
        }

        if let Some(body) = body {
            let body_bytes = serde_json::to_vec(body)?;
            if self.config.debug {
                tracing::debug!(
                    method = %method,
                    path,
                    body = %String::from_utf8_lossy(&body_bytes),
                    "request body"
                );
            }
            request = request.body(body_bytes);
        }

        // Execute request
        let start = std::time::Instant::now();
        let http_response = request.send()?;
        let status = http_response.status();
        let response_body = http_response.bytes()?;

        tracing::debug!(
            method = %method,
            path,
            status = status.as_u16(),
            elapsed = ?start.elapsed(),
            "request completed"
        );
        if self.config.debug {
            tracing::debug!(
                method = %method,
                path,
                body = %String::from_utf8_lossy(&response_body),
                "response body"
            );
        }

        check_envelope(status.as_u16(), &response_body).map_err(|err| {
            if let TrackingError::Api {
                code, error_type, ..
            } = &err
            {
                tracing::warn!(method = %method, path, code, error_type = %error_type, "API error");
            }
            err
        })
    }
}
