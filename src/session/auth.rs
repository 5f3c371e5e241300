use crate::transport::model::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"email\":\"{}\",\"password\":\"[REDACTED]\"}}",
            self.email
        )
    }
}

/// Tokens and user record carried in `data` by register and login responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
}

impl AuthPayload {
    /// Extracts the payload when the envelope carries a non-empty access token.
    pub fn from_envelope(envelope: &ApiResult) -> Option<Self> {
        let data = envelope.data.as_ref()?;
        let has_token = data
            .get("accessToken")
            .and_then(Value::as_str)
            .is_some_and(|token| !token.is_empty());
        if !has_token {
            return None;
        }
        serde_json::from_value(data.clone()).ok()
    }
}
