/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/

use crate::error::AppError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::fmt;
use std::fmt::Display;
use tracing::debug;

/// Headers attached to every API request.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RequestHeaders {
    pub(crate) bearer: Option<String>,
}

impl RequestHeaders {
    pub(crate) fn new(bearer: Option<&str>) -> Self {
        Self {
            bearer: bearer.map(str::to_string),
        }
    }

    /// Builds the header map for a request.
    ///
    /// `Content-Type: application/json` is always present. `Authorization`
    /// is added as `Bearer <token>` only when a token was supplied.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidHeader` if the token contains characters
    /// that are not valid in a header value.
    pub(crate) fn to_header_map(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.bearer {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        debug!("Request headers: {}", self);
        Ok(headers)
    }
}

impl Display for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"content_type\":\"application/json\",\"authorization\":{}}}",
            self.bearer
                .as_ref()
                .map_or("null".to_string(), |_| "\"[REDACTED]\"".to_string())
        )
    }
}
