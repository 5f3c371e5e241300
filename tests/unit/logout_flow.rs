use std::sync::Arc;
use std::time::Duration;

use college_guide_client::application::services::auth_service::AuthService;
use college_guide_client::config::StorageConfig;
use college_guide_client::presentation::controller::{ClickTarget, LogoutOutcome};
use college_guide_client::presentation::page::NotificationKind;
use college_guide_client::session::session::SessionStore;
use college_guide_client::storage::cookies::Cookie;
use college_guide_client::utils::logger::setup_logger;
use mockito::Server;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use crate::common::{harness, NAV};

#[tokio::test]
async fn test_logout_click_resets_navigation() {
    setup_logger();
    let mut server = Server::new_async().await;
    let revoke = server
        .mock("POST", "/users/logout")
        .match_header("authorization", "Bearer T1")
        .with_status(200)
        .with_body(r#"{"statusCode": 200, "data": {}, "message": "User logged out"}"#)
        .expect(1)
        .create_async()
        .await;
    let store = Arc::new(SessionStore::in_memory());
    store
        .set_session("T1", Some("R1"), Some(&json!({"name": "Ann", "role": "student"})))
        .unwrap();
    store.cookies().set(Cookie::new("token", "T1"));

    let mut h = harness(&server.url(), store.clone());
    h.nav.init().unwrap();
    h.nav
        .handle_click(&ClickTarget::element("user-profile", true))
        .await;
    assert!(h.nav.is_dropdown_open());

    let outcome = h
        .nav
        .handle_click(&ClickTarget::element("logout-btn", true))
        .await;

    assert_eq!(outcome, Some(LogoutOutcome::Completed));
    h.nav.wait_for_revoke().await;
    revoke.assert_async().await;
    assert!(!h.api.is_logged_in());
    assert_eq!(store.get_token(), None);
    assert_eq!(store.cookies().get("token"), None);
    assert!(!h.nav.is_dropdown_open());

    let page = h.nav.page();
    assert!(page.markup(NAV).unwrap().contains(">Sign up</a>"));
    let notification = page.notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(page.last_redirect().unwrap().href, "index.html");
    assert_eq!(page.last_redirect().unwrap().delay, Duration::from_secs(1));
}

#[tokio::test]
async fn test_service_logout_clears_file_store() {
    setup_logger();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/users/logout")
        .match_header("authorization", "Bearer T1")
        .with_status(200)
        .with_body(r#"{"statusCode": 200, "data": {}, "message": "User logged out"}"#)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let storage = StorageConfig {
        path: dir.path().join("session.json"),
    };
    let store = Arc::new(SessionStore::open(&storage).unwrap());
    store
        .set_session("T1", Some("R1"), Some(&json!({"name": "Ann", "role": "student"})))
        .unwrap();
    store.persistent().set_item("theme", "dark").unwrap();

    let h = harness(&server.url(), store);
    h.api.auth.logout().await.unwrap();
    mock.assert_async().await;

    let reopened = SessionStore::open(&storage).unwrap();
    assert!(!reopened.is_logged_in());
    assert_eq!(reopened.get_token(), None);
    assert_eq!(reopened.persistent().get_item("theme").as_deref(), Some("dark"));
}
