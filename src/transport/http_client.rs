use crate::constants::DEFAULT_ERROR_MESSAGE;
use crate::error::AppError;
use crate::transport::headers::RequestHeaders;
use async_trait::async_trait;
use reqwest::{header, Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, error, instrument};

/// Transport used by the services: one request, one decoded response.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends `body` (if any) to `path` and decodes the JSON response.
    ///
    /// `bearer` is attached as `Authorization: Bearer <token>` when present.
    ///
    /// # Errors
    ///
    /// * `AppError::Network` when the request cannot be sent or read.
    /// * `AppError::Api` when the status is not 2xx; the message comes from
    ///   the body's `message` field or falls back to a generic one.
    /// * `AppError::Json` when a successful body cannot be decoded.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        B: Serialize + Send + Sync,
        T: DeserializeOwned + Debug + Send;
}

/// `reqwest` implementation of [`HttpClient`] bound to one base URL.
#[derive(Debug, Clone)]
pub struct RestHttpClient {
    client: Client,
    base_url: String,
}

impl RestHttpClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5001/api`).
    ///
    /// No timeout is configured: a request runs until it completes or fails.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn handle_response<T: DeserializeOwned + Debug>(
        response: Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body_text);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            Ok(body)
        } else {
            error!(
                "API request failed. Status: {}, Body: {}",
                status, body_text
            );
            Err(AppError::Api {
                status,
                message: Self::error_message(&body_text),
            })
        }
    }

    fn error_message(body_text: &str) -> String {
        serde_json::from_str::<Value>(body_text)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
    }
}

#[async_trait]
impl HttpClient for RestHttpClient {
    #[instrument(skip(self, bearer, body))]
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        B: Serialize + Send + Sync,
        T: DeserializeOwned + Debug + Send,
    {
        let url = self.url(path);
        debug!("Sending {} request to {}", method, url);

        let headers = RequestHeaders::new(bearer).to_header_map()?;
        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send request to {}: {:?}", url, e);
                return Err(e.into());
            }
        };

        Self::handle_response(response).await
    }
}
