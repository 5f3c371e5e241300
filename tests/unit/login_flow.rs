use std::sync::Arc;

use college_guide_client::application::services::auth_service::AuthService;
use college_guide_client::presentation::controller::RenderOutcome;
use college_guide_client::session::session::SessionStore;
use college_guide_client::utils::logger::setup_logger;
use mockito::Server;
use pretty_assertions::assert_eq;

use crate::common::{harness, ADMIN_LOGIN, NAV, STUDENT_LOGIN};

#[tokio::test]
async fn test_student_login_then_render() {
    setup_logger();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(STUDENT_LOGIN)
        .create_async()
        .await;

    let store = Arc::new(SessionStore::in_memory());
    let mut h = harness(&server.url(), store.clone());
    assert_eq!(h.nav.init().unwrap(), RenderOutcome::Guest);

    h.api.auth.login("a@b.com", "pw").await.unwrap();
    mock.assert_async().await;

    assert_eq!(store.get_token().as_deref(), Some("T1"));
    assert_eq!(store.get_refresh_token().as_deref(), Some("R1"));
    let user = h.api.stored_user().unwrap();
    assert_eq!(user.name, "Ann");
    assert_eq!(user.extra.get("email").and_then(|v| v.as_str()), Some("a@b.com"));

    assert_eq!(h.nav.render().unwrap(), RenderOutcome::Authenticated);
    let markup = h.nav.page().markup(NAV).unwrap();
    assert!(markup.contains(">Dashboard</a>"));
    assert!(markup.contains(">Profile</a>"));
    assert!(markup.contains("👤 Ann ▼"));
    assert!(!markup.contains(">Login</a>"));
}

#[tokio::test]
async fn test_admin_login_shows_admin_panel() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/users/login")
        .with_status(200)
        .with_body(ADMIN_LOGIN)
        .create_async()
        .await;

    let mut h = harness(&server.url(), Arc::new(SessionStore::in_memory()));
    h.api.auth.login("root@b.com", "pw").await.unwrap();
    h.nav.render().unwrap();

    let markup = h.nav.page().markup(NAV).unwrap();
    assert!(markup.contains(r#"<a href="admin.html" class="hover-link">Admin Panel</a>"#));
    assert!(!markup.contains(">Profile</a>"));
    assert!(!markup.contains(">After SEE</a>"));
}

#[tokio::test]
async fn test_rejected_login_keeps_guest_navigation() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/users/login")
        .with_status(401)
        .with_body(r#"{"statusCode": 401, "message": "Invalid user credentials", "success": false}"#)
        .create_async()
        .await;

    let mut h = harness(&server.url(), Arc::new(SessionStore::in_memory()));
    let err = h.api.auth.login("a@b.com", "bad").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid user credentials");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));

    assert_eq!(h.nav.render().unwrap(), RenderOutcome::Guest);
    assert!(h.nav.page().markup(NAV).unwrap().contains(">Login</a>"));
}

#[test]
fn test_malformed_user_renders_guest() {
    setup_logger();
    let store = Arc::new(SessionStore::in_memory());
    store.persistent().set_item("accessToken", "T1").unwrap();
    store.persistent().set_item("user", "{broken").unwrap();

    let mut h = harness("http://127.0.0.1:9/api", store.clone());
    assert!(!h.api.is_logged_in());
    assert_eq!(h.nav.render().unwrap(), RenderOutcome::Guest);
}
