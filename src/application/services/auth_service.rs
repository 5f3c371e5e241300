use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::AppError,
    session::{
        auth::{AuthPayload, Credentials},
        session::SessionStore,
    },
    transport::{http_client::HttpClient, model::ApiResult},
};

/// Account endpoints under `/users`
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account; stores the session when the response carries a token
    async fn register(&self, user_data: &Value) -> Result<ApiResult, AppError>;

    /// Signs in; stores the session when the response carries a token
    async fn login(&self, email: &str, password: &str) -> Result<ApiResult, AppError>;

    /// Ends the session on the server and clears the local one, whatever the
    /// server answered
    async fn logout(&self) -> Result<ApiResult, AppError>;

    /// Only the remote half of `logout`, for callers that already cleared
    /// local state
    async fn revoke_session(&self, token: Option<&str>) -> Result<ApiResult, AppError>;

    async fn current_user(&self) -> Result<ApiResult, AppError>;

    async fn update_profile(&self, user_data: &Value) -> Result<ApiResult, AppError>;
}

pub struct AuthServiceImpl<T: HttpClient> {
    client: Arc<T>,
    store: Arc<SessionStore>,
}

impl<T: HttpClient> AuthServiceImpl<T> {
    pub fn new(client: Arc<T>, store: Arc<SessionStore>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    fn remember(&self, envelope: &ApiResult) -> Result<(), AppError> {
        match AuthPayload::from_envelope(envelope) {
            Some(payload) => self.store.set_session(
                &payload.access_token,
                payload.refresh_token.as_deref(),
                payload.user.as_ref(),
            ),
            None => {
                debug!("Response carried no access token, session left untouched");
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<T: HttpClient + 'static> AuthService for AuthServiceImpl<T> {
    #[instrument(skip_all)]
    async fn register(&self, user_data: &Value) -> Result<ApiResult, AppError> {
        info!("Registering new user");

        let result = self
            .client
            .request::<Value, ApiResult>(Method::POST, "/users/register", None, Some(user_data))
            .await?;

        self.remember(&result)?;
        Ok(result)
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<ApiResult, AppError> {
        let credentials = Credentials::new(email, password);
        info!("Logging in {}", credentials);

        let result = self
            .client
            .request::<Credentials, ApiResult>(
                Method::POST,
                "/users/login",
                None,
                Some(&credentials),
            )
            .await?;

        self.remember(&result)?;
        debug!("Login successful for {}", email);
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<ApiResult, AppError> {
        info!("Logging out");

        let token = self.store.get_token();
        let result = self.revoke_session(token.as_deref()).await;

        if let Err(e) = self.store.clear() {
            warn!("Failed to clear session after logout: {}", e);
            return Err(e);
        }
        result
    }

    #[instrument(skip_all)]
    async fn revoke_session(&self, token: Option<&str>) -> Result<ApiResult, AppError> {
        self.client
            .request::<(), ApiResult>(Method::POST, "/users/logout", token, None)
            .await
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<ApiResult, AppError> {
        let token = self.store.get_token();
        self.client
            .request::<(), ApiResult>(Method::GET, "/users/current-user", token.as_deref(), None)
            .await
    }

    #[instrument(skip_all)]
    async fn update_profile(&self, user_data: &Value) -> Result<ApiResult, AppError> {
        info!("Updating profile");
        let token = self.store.get_token();
        self.client
            .request::<Value, ApiResult>(
                Method::PATCH,
                "/users/update-profile",
                token.as_deref(),
                Some(user_data),
            )
            .await
    }
}
