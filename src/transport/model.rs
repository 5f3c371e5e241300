use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{ data, message }` wrapper the backend puts around every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Endpoint specific payload
    pub data: Option<T>,
    /// Human readable status message
    pub message: Option<String>,
    /// Success flag, when the backend sends one
    pub success: Option<bool>,
    /// HTTP status echoed in the body
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
}

/// Envelope with an opaque payload, the result of every service call
pub type ApiResult = ApiEnvelope<Value>;

impl ApiResult {
    /// Looks up a top level field of `data`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(name))
    }
}
