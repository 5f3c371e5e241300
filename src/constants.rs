/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";
pub(crate) const DEFAULT_STORAGE_PATH: &str = "college_guide_session.json";
pub(crate) const DEFAULT_HOME_PAGE: &str = "index.html";
pub(crate) const DEFAULT_LOGOUT_REDIRECT_DELAY_MS: u64 = 1000;
pub(crate) const DEFAULT_FORCED_LOGOUT_REDIRECT_DELAY_MS: u64 = 500;
pub(crate) const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 3000;

/// Message used when a failed response carries no `message` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

// Persistent storage keys
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const LEGACY_AUTHENTICATED_KEY: &str = "isAuthenticated";

pub(crate) const SESSION_COOKIES: [&str; 2] = ["token", "user"];

/// Navigation container lookup order.
pub const NAV_CONTAINER_SELECTORS: [&str; 2] = [".nav-link ul", "#navigation-menu"];

pub const USER_MENU_TOGGLE_ID: &str = "user-profile";
pub const USER_DROPDOWN_ID: &str = "user-dropdown";
pub const LOGOUT_BUTTON_ID: &str = "logout-btn";

pub(crate) const LOGIN_PAGE: &str = "login.html";
pub(crate) const DASHBOARD_PAGE: &str = "dashboard.html";
pub(crate) const ADMIN_PAGE: &str = "admin.html";
