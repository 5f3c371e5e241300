use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    application::models::query::CoursePreference,
    error::AppError,
    session::session::SessionStore,
    transport::{http_client::HttpClient, model::ApiResult},
};

/// Course catalogue and the signed-in user's preferred courses
#[async_trait]
pub trait CourseService: Send + Sync {
    async fn list_courses(&self) -> Result<ApiResult, AppError>;

    async fn preferred_courses(&self) -> Result<ApiResult, AppError>;

    async fn add_preference(&self, course_id: &str) -> Result<ApiResult, AppError>;
}

pub struct CourseServiceImpl<T: HttpClient> {
    client: Arc<T>,
    store: Arc<SessionStore>,
}

impl<T: HttpClient> CourseServiceImpl<T> {
    pub fn new(client: Arc<T>, store: Arc<SessionStore>) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl<T: HttpClient + 'static> CourseService for CourseServiceImpl<T> {
    #[instrument(skip(self))]
    async fn list_courses(&self) -> Result<ApiResult, AppError> {
        self.client
            .request::<(), ApiResult>(Method::GET, "/courses", None, None)
            .await
    }

    #[instrument(skip(self))]
    async fn preferred_courses(&self) -> Result<ApiResult, AppError> {
        let token = self.store.get_token();
        self.client
            .request::<(), ApiResult>(Method::GET, "/courses/preferences", token.as_deref(), None)
            .await
    }

    #[instrument(skip(self))]
    async fn add_preference(&self, course_id: &str) -> Result<ApiResult, AppError> {
        info!("Adding course {} to preferences", course_id);
        let token = self.store.get_token();
        let body = CoursePreference { course_id };
        self.client
            .request::<CoursePreference, ApiResult>(
                Method::POST,
                "/courses/preferences/add",
                token.as_deref(),
                Some(&body),
            )
            .await
    }
}
