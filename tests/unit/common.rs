use std::sync::Arc;

use college_guide_client::application::services::api_client::ApiClient;
use college_guide_client::application::services::auth_service::AuthService;
use college_guide_client::config::{Config, NavigationConfig, RestApiConfig, StorageConfig};
use college_guide_client::presentation::controller::NavigationController;
use college_guide_client::presentation::page::InMemoryPage;
use college_guide_client::session::session::SessionStore;
use college_guide_client::transport::http_client::RestHttpClient;

pub const NAV: &str = ".nav-link ul";

pub const STUDENT_LOGIN: &str = r#"{
    "statusCode": 200,
    "data": {
        "accessToken": "T1",
        "refreshToken": "R1",
        "user": {"_id": "u1", "name": "Ann", "email": "a@b.com", "role": "student"}
    },
    "message": "User logged in successfully",
    "success": true
}"#;

pub const ADMIN_LOGIN: &str = r#"{
    "statusCode": 200,
    "data": {
        "accessToken": "A1",
        "refreshToken": "AR1",
        "user": {"name": "Root", "role": "admin"}
    },
    "message": "User logged in successfully",
    "success": true
}"#;

pub fn config(base_url: &str) -> Config {
    Config {
        rest_api: RestApiConfig {
            base_url: base_url.to_string(),
        },
        storage: StorageConfig {
            path: "unused.json".into(),
        },
        navigation: NavigationConfig {
            home_page: "index.html".to_string(),
            logout_redirect_delay_ms: 1000,
            forced_logout_redirect_delay_ms: 500,
            notification_timeout_ms: 3000,
        },
    }
}

pub struct Harness {
    pub api: ApiClient<RestHttpClient>,
    pub nav: NavigationController<InMemoryPage>,
}

pub fn harness(base_url: &str, store: Arc<SessionStore>) -> Harness {
    let config = Arc::new(config(base_url));
    let api = ApiClient::from_config(&config, store.clone()).unwrap();
    let auth: Arc<dyn AuthService> = api.auth.clone();
    let nav = NavigationController::new(config, store, auth, InMemoryPage::with_containers(&[NAV]));
    Harness { api, nav }
}
