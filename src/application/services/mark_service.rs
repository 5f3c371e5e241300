use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    error::AppError,
    session::session::SessionStore,
    transport::{http_client::HttpClient, model::ApiResult},
};

/// The signed-in student's marks, GPA and analytics. Every call is
/// authenticated.
#[async_trait]
pub trait MarkService: Send + Sync {
    async fn my_marks(&self) -> Result<ApiResult, AppError>;

    async fn add_mark(&self, mark: &Value) -> Result<ApiResult, AppError>;

    async fn update_mark(&self, mark_id: &str, mark: &Value) -> Result<ApiResult, AppError>;

    async fn delete_mark(&self, mark_id: &str) -> Result<ApiResult, AppError>;

    async fn calculate_gpa(&self) -> Result<ApiResult, AppError>;

    async fn analytics(&self) -> Result<ApiResult, AppError>;
}

pub struct MarkServiceImpl<T: HttpClient> {
    client: Arc<T>,
    store: Arc<SessionStore>,
}

impl<T: HttpClient> MarkServiceImpl<T> {
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
impl<T: HttpClient + 'static> MarkService for MarkServiceImpl<T> {
    #[instrument(skip(self))]
    async fn my_marks(&self) -> Result<ApiResult, AppError> {
        self.send(Method::GET, "/marks/my-marks", None).await
    }

    #[instrument(skip_all)]
    async fn add_mark(&self, mark: &Value) -> Result<ApiResult, AppError> {
        info!("Adding mark");
        self.send(Method::POST, "/marks/add-my-mark", Some(mark)).await
    }

    #[instrument(skip(self, mark))]
    async fn update_mark(&self, mark_id: &str, mark: &Value) -> Result<ApiResult, AppError> {
        info!("Updating mark {}", mark_id);
        let path = format!("/marks/update-my-mark/{}", urlencoding::encode(mark_id));
        self.send(Method::PUT, &path, Some(mark)).await
    }

    #[instrument(skip(self))]
    async fn delete_mark(&self, mark_id: &str) -> Result<ApiResult, AppError> {
        info!("Deleting mark {}", mark_id);
        let path = format!("/marks/delete-my-mark/{}", urlencoding::encode(mark_id));
        self.send(Method::DELETE, &path, None).await
    }

    #[instrument(skip(self))]
    async fn calculate_gpa(&self) -> Result<ApiResult, AppError> {
        let result = self.send(Method::GET, "/marks/calculate-gpa", None).await?;
        debug!("GPA: {:?}", result.field("gpa"));
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn analytics(&self) -> Result<ApiResult, AppError> {
        self.send(Method::GET, "/marks/analytics", None).await
    }
}

#[cfg(test)]
mod tests_mark_service {
    use super::*;
    use crate::transport::http_client::RestHttpClient;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service(server: &Server) -> MarkServiceImpl<RestHttpClient> {
        let client = Arc::new(RestHttpClient::new(&server.url()).unwrap());
        let store = Arc::new(SessionStore::in_memory());
        store.set_session("T1", None, None).unwrap();
        MarkServiceImpl::new(client, store)
    }

    #[tokio::test]
    async fn test_mark_crud_routes() {
        setup_logger();
        let mut server = Server::new_async().await;
        let mark = json!({"subject": "Physics", "marks": 82, "fullMarks": 100});

        let list = server
            .mock("GET", "/marks/my-marks")
            .match_header("authorization", "Bearer T1")
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;
        let add = server
            .mock("POST", "/marks/add-my-mark")
            .match_header("authorization", "Bearer T1")
            .match_body(Matcher::Json(mark.clone()))
            .with_status(201)
            .with_body(r#"{"data": {"_id": "m1"}}"#)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/marks/update-my-mark/m1")
            .match_body(Matcher::Json(mark.clone()))
            .with_status(200)
            .with_body(r#"{"data": {"_id": "m1"}}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/marks/delete-my-mark/m1")
            .match_header("authorization", "Bearer T1")
            .with_status(200)
            .with_body(r#"{"data": null, "message": "Mark deleted"}"#)
            .create_async()
            .await;

        let marks = service(&server);
        marks.my_marks().await.unwrap();
        let added = marks.add_mark(&mark).await.unwrap();
        assert_eq!(added.field("_id"), Some(&json!("m1")));
        marks.update_mark("m1", &mark).await.unwrap();
        let deleted = marks.delete_mark("m1").await.unwrap();
        assert_eq!(deleted.data, None);
        assert_eq!(deleted.message.as_deref(), Some("Mark deleted"));

        list.assert_async().await;
        add.assert_async().await;
        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_mark_id_is_percent_encoded() {
        setup_logger();
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", "/marks/delete-my-mark/m1%2F..%3Fall%3D1")
            .with_status(200)
            .with_body(r#"{"message": "Mark deleted"}"#)
            .create_async()
            .await;

        let marks = service(&server);
        marks.delete_mark("m1/..?all=1").await.unwrap();
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_gpa_and_analytics() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _gpa = server
            .mock("GET", "/marks/calculate-gpa")
            .with_status(200)
            .with_body(r#"{"data": {"gpa": 3.6}}"#)
            .create_async()
            .await;
        let _analytics = server
            .mock("GET", "/marks/analytics")
            .with_status(404)
            .with_body(r#"{"message": "No marks found"}"#)
            .create_async()
            .await;

        let marks = service(&server);
        let gpa = marks.calculate_gpa().await.unwrap();
        assert_eq!(gpa.field("gpa"), Some(&json!(3.6)));

        let err = marks.analytics().await.unwrap_err();
        assert_eq!(err.to_string(), "No marks found");
    }
}
