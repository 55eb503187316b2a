use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TrackingError};

/// `meta.code` values the service uses to report success.
pub const SUCCESS_CODES: [i64; 2] = [200, 201];

/// Status block the service embeds in every response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Logical status code; 200 and 201 mean success
    pub code: i64,

    /// Short error class, e.g. "Success" or "Bad Request"
    #[serde(rename = "type", default)]
    pub error_type: String,

    /// Human readable message
    #[serde(default)]
    pub message: String,
}

impl Meta {
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code)
    }
}

/// Response represents the `{meta, data}` envelope returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub meta: Meta,

    /// Response data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    /// Parse an envelope from a raw response body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Turn a failure envelope into `TrackingError::Api`, leaving success untouched
    pub fn into_result(self) -> Result<Self> {
        if self.meta.is_success() {
            return Ok(self);
        }
        Err(TrackingError::Api {
            code: self.meta.code,
            error_type: self.meta.error_type,
            message: self.meta.message,
        })
    }

    /// Get the raw data value from the response
    pub fn raw(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Consume the envelope and return its data section (`null` when absent)
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }

    /// Apply unmarshals the response data into the provided type
    pub fn apply<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        match &self.data {
            Some(data) => serde_json::from_value(data.clone()).map_err(|e| e.into()),
            None => serde_json::from_value(Value::Null).map_err(|e| e.into()),
        }
    }

    /// Get a value from the response data by a slash-separated path.
    /// For example, "items/0/carrier_code" reads the carrier of the first item.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut current = self.data.as_ref()?;

        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the response data by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

/// Validate a raw HTTP response and return the checked envelope.
///
/// A non-2xx transport status is a `TrackingError::Transport`. A 2xx body is
/// then parsed and its `meta.code` inspected: the service reports logical
/// failures with transport success, so anything outside 200/201 becomes
/// `TrackingError::Api` with the envelope fields copied verbatim.
pub fn check_envelope(status: u16, body: &[u8]) -> Result<Response> {
    if !(200..300).contains(&status) {
        return Err(TrackingError::transport(
            status,
            String::from_utf8_lossy(body).to_string(),
        ));
    }
    Response::from_slice(body)?.into_result()
}

/// Same as [`check_envelope`] but returns only the `data` section.
pub fn check_response(status: u16, body: &[u8]) -> Result<Value> {
    check_envelope(status, body).map(Response::into_data)
}
