use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    application::models::query::{MarksFilter, Pagination},
    error::AppError,
    session::session::SessionStore,
    transport::{http_client::HttpClient, model::ApiResult},
};

/// College catalogue and search endpoints
#[async_trait]
pub trait CollegeService: Send + Sync {
    async fn list_colleges(&self, pagination: Pagination) -> Result<ApiResult, AppError>;

    /// Colleges reachable with the given marks; requires a session
    async fn search_by_marks(&self, filter: MarksFilter) -> Result<ApiResult, AppError>;

    /// Recommendations computed from the signed-in student's marks
    async fn recommendations(&self) -> Result<ApiResult, AppError>;

    async fn search_by_location(&self, location: &str) -> Result<ApiResult, AppError>;
}

pub struct CollegeServiceImpl<T: HttpClient> {
    client: Arc<T>,
    store: Arc<SessionStore>,
}

impl<T: HttpClient> CollegeServiceImpl<T> {
    pub fn new(client: Arc<T>, store: Arc<SessionStore>) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl<T: HttpClient + 'static> CollegeService for CollegeServiceImpl<T> {
    #[instrument(skip(self))]
    async fn list_colleges(&self, pagination: Pagination) -> Result<ApiResult, AppError> {
        let path = format!("/colleges?{}", pagination.query());
        info!("Listing colleges");

        self.client
            .request::<(), ApiResult>(Method::GET, &path, None, None)
            .await
    }

    #[instrument(skip(self))]
    async fn search_by_marks(&self, filter: MarksFilter) -> Result<ApiResult, AppError> {
        let path = match filter.query() {
            Some(query) => format!("/colleges/search/by-marks?{query}"),
            None => "/colleges/search/by-marks".to_string(),
        };
        info!("Searching colleges by marks");

        let token = self.store.get_token();
        self.client
            .request::<(), ApiResult>(Method::GET, &path, token.as_deref(), None)
            .await
    }

    #[instrument(skip(self))]
    async fn recommendations(&self) -> Result<ApiResult, AppError> {
        let token = self.store.get_token();
        let result = self
            .client
            .request::<(), ApiResult>(
                Method::GET,
                "/colleges/recommendations",
                token.as_deref(),
                None,
            )
            .await?;

        debug!("Recommendations received: {:?}", result.message);
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn search_by_location(&self, location: &str) -> Result<ApiResult, AppError> {
        let path = format!(
            "/colleges/search/location?location={}",
            urlencoding::encode(location)
        );
        info!("Searching colleges in {}", location);

        self.client
            .request::<(), ApiResult>(Method::GET, &path, None, None)
            .await
    }
}
