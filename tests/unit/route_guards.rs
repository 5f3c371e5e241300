use std::sync::Arc;

use college_guide_client::session::session::SessionStore;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::harness;

const OFFLINE: &str = "http://127.0.0.1:9/api";

#[test]
fn test_guest_is_sent_to_login() {
    let mut h = harness(OFFLINE, Arc::new(SessionStore::in_memory()));
    assert!(!h.nav.require_auth());
    assert!(!h.nav.redirect_if_logged_in());
    assert_eq!(h.nav.page().redirects().len(), 1);
    assert_eq!(h.nav.page().last_redirect().unwrap().href, "login.html");
}

#[test]
fn test_member_is_sent_to_dashboard() {
    let store = Arc::new(SessionStore::in_memory());
    store
        .set_session("T1", None, Some(&json!({"name": "Ann", "role": "student"})))
        .unwrap();

    let mut h = harness(OFFLINE, store);
    assert!(h.nav.require_auth());
    assert!(h.nav.redirect_if_logged_in());
    assert_eq!(h.nav.page().last_redirect().unwrap().href, "dashboard.html");
}
