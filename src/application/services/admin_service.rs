use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    application::models::query::{Pagination, RoleUpdate},
    error::AppError,
    session::session::SessionStore,
    transport::{http_client::HttpClient, model::ApiResult},
};

/// Administration endpoints under `/admin`. Every call is authenticated.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Lists users; an empty or absent `role` lists every role
    async fn list_users(
        &self,
        pagination: Pagination,
        role: Option<&str>,
    ) -> Result<ApiResult, AppError>;

    async fn delete_user(&self, user_id: &str) -> Result<ApiResult, AppError>;

    async fn update_user_role(&self, user_id: &str, role: &str) -> Result<ApiResult, AppError>;

    async fn user_stats(&self) -> Result<ApiResult, AppError>;

    async fn create_college(&self, college: &Value) -> Result<ApiResult, AppError>;

    async fn update_college(&self, college_id: &str, college: &Value)
        -> Result<ApiResult, AppError>;

    async fn delete_college(&self, college_id: &str) -> Result<ApiResult, AppError>;

    async fn create_course(&self, course: &Value) -> Result<ApiResult, AppError>;

    async fn update_course(&self, course_id: &str, course: &Value) -> Result<ApiResult, AppError>;

    async fn delete_course(&self, course_id: &str) -> Result<ApiResult, AppError>;
}

pub struct AdminServiceImpl<T: HttpClient> {
    client: Arc<T>,
    store: Arc<SessionStore>,
}

impl<T: HttpClient> AdminServiceImpl<T> {
    pub fn new(client: Arc<T>, store: Arc<SessionStore>) -> Self {
        Self { client, store }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResult, AppError> {
        let token = self.store.get_token();
        self.client
            .request::<Value, ApiResult>(method, path, token.as_deref(), body)
            .await
    }
}

#[async_trait]
impl<T: HttpClient + 'static> AdminService for AdminServiceImpl<T> {
    #[instrument(skip(self))]
    async fn list_users(
        &self,
        pagination: Pagination,
        role: Option<&str>,
    ) -> Result<ApiResult, AppError> {
        let mut path = format!("/admin/users?{}", pagination.query());
        if let Some(role) = role.filter(|role| !role.is_empty()) {
            path.push_str(&format!("&role={}", urlencoding::encode(role)));
        }
        self.send(Method::GET, &path, None).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str) -> Result<ApiResult, AppError> {
        info!("Deleting user {}", user_id);
        let path = format!("/admin/users/{}", urlencoding::encode(user_id));
        self.send(Method::DELETE, &path, None).await
    }

    #[instrument(skip(self))]
    async fn update_user_role(&self, user_id: &str, role: &str) -> Result<ApiResult, AppError> {
        info!("Changing role of user {} to {}", user_id, role);
        let token = self.store.get_token();
        self.client
            .request::<RoleUpdate, ApiResult>(
                Method::PATCH,
                &format!("/admin/users/{}/role", urlencoding::encode(user_id)),
                token.as_deref(),
                Some(&RoleUpdate { role }),
            )
            .await
    }

    #[instrument(skip(self))]
    async fn user_stats(&self) -> Result<ApiResult, AppError> {
        self.send(Method::GET, "/admin/users/stats", None).await
    }

    #[instrument(skip_all)]
    async fn create_college(&self, college: &Value) -> Result<ApiResult, AppError> {
        info!("Creating college");
        self.send(Method::POST, "/admin/colleges", Some(college))
            .await
    }

    #[instrument(skip(self, college))]
    async fn update_college(
        &self,
        college_id: &str,
        college: &Value,
    ) -> Result<ApiResult, AppError> {
        info!("Updating college {}", college_id);
        self.send(
            Method::PUT,
            &format!("/admin/colleges/{}", urlencoding::encode(college_id)),
            Some(college),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_college(&self, college_id: &str) -> Result<ApiResult, AppError> {
        info!("Deleting college {}", college_id);
        let path = format!("/admin/colleges/{}", urlencoding::encode(college_id));
        self.send(Method::DELETE, &path, None).await
    }

    #[instrument(skip_all)]
    async fn create_course(&self, course: &Value) -> Result<ApiResult, AppError> {
        info!("Creating course");
        self.send(Method::POST, "/admin/courses", Some(course)).await
    }

    #[instrument(skip(self, course))]
    async fn update_course(&self, course_id: &str, course: &Value) -> Result<ApiResult, AppError> {
        info!("Updating course {}", course_id);
        self.send(
            Method::PUT,
            &format!("/admin/courses/{}", urlencoding::encode(course_id)),
            Some(course),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, course_id: &str) -> Result<ApiResult, AppError> {
        info!("Deleting course {}", course_id);
        let path = format!("/admin/courses/{}", urlencoding::encode(course_id));
        self.send(Method::DELETE, &path, None).await
    }
}
