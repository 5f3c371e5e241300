use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::application::services::auth_service::AuthService;
use crate::config::Config;
use crate::constants::{
    LOGIN_PAGE, LOGOUT_BUTTON_ID, NAV_CONTAINER_SELECTORS, USER_DROPDOWN_ID, USER_MENU_TOGGLE_ID,
};
use crate::error::AppError;
use crate::presentation::navigation::{dashboard_for, NavState, NavigationView};
use crate::presentation::page::{Notification, NotificationKind, PageSurface, Redirect};
use crate::session::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Guest,
    Authenticated,
    /// No navigation container on the page; nothing was rendered.
    NoContainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Session keys cleared normally.
    Completed,
    /// Normal clearing failed and all client state was wiped instead.
    Forced,
}

/// A click as the controller sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickTarget {
    pub element_id: Option<String>,
    /// Whether the click landed inside the `.user-menu` element.
    pub inside_user_menu: bool,
}

impl ClickTarget {
    pub fn element(id: &str, inside_user_menu: bool) -> Self {
        Self {
            element_id: Some(id.to_string()),
            inside_user_menu,
        }
    }

    pub fn outside() -> Self {
        Self::default()
    }

    fn is(&self, id: &str) -> bool {
        self.element_id.as_deref() == Some(id)
    }
}

/// Dropdown handlers bound by the last authenticated render.
#[derive(Debug, Default)]
struct DropdownBinding {
    open: bool,
}

/// Keeps the page navigation in sync with the stored session.
pub struct NavigationController<P: PageSurface> {
    config: Arc<Config>,
    store: Arc<SessionStore>,
    auth: Arc<dyn AuthService>,
    page: P,
    dropdown: Option<DropdownBinding>,
    revoke: Option<JoinHandle<()>>,
}

impl<P: PageSurface> NavigationController<P> {
    pub fn new(
        config: Arc<Config>,
        store: Arc<SessionStore>,
        auth: Arc<dyn AuthService>,
        page: P,
    ) -> Self {
        Self {
            config,
            store,
            auth,
            page,
            dropdown: None,
            revoke: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn state(&self) -> NavState {
        NavState::from_store(&self.store)
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown.as_ref().is_some_and(|binding| binding.open)
    }

    /// Initial render on page load.
    pub fn init(&mut self) -> Result<RenderOutcome, AppError> {
        info!("Initializing navigation");
        self.render()
    }

    /// Re-evaluates the session and rewrites the navigation container.
    #[instrument(skip(self))]
    pub fn render(&mut self) -> Result<RenderOutcome, AppError> {
        let state = self.state();
        debug!("Auth status: authenticated={}", state.is_authenticated());

        let Some(selector) = NAV_CONTAINER_SELECTORS
            .into_iter()
            .find(|selector| self.page.has_element(selector))
        else {
            warn!("No navigation container found");
            self.dropdown = None;
            return Ok(RenderOutcome::NoContainer);
        };

        let markup = NavigationView::for_state(&state).render()?;
        self.page.set_inner_html(selector, &markup);

        // Replace, never stack, the dropdown handlers.
        self.dropdown = None;
        match state {
            NavState::Authenticated(user) => {
                debug!("Authenticated navigation created for role {}", user.role);
                self.page.set_visible(USER_DROPDOWN_ID, false);
                self.dropdown = Some(DropdownBinding::default());
                Ok(RenderOutcome::Authenticated)
            }
            NavState::Guest => {
                debug!("Guest navigation created");
                Ok(RenderOutcome::Guest)
            }
        }
    }

    /// Routes a click: logout button, dropdown toggle, or click elsewhere.
    pub async fn handle_click(&mut self, target: &ClickTarget) -> Option<LogoutOutcome> {
        if target.is(LOGOUT_BUTTON_ID) {
            return Some(self.logout().await);
        }

        let binding = self.dropdown.as_mut()?;
        if target.is(USER_MENU_TOGGLE_ID) {
            binding.open = !binding.open;
            debug!("Dropdown visibility: {}", binding.open);
            self.page.set_visible(USER_DROPDOWN_ID, binding.open);
        } else if !target.inside_user_menu && binding.open {
            binding.open = false;
            self.page.set_visible(USER_DROPDOWN_ID, false);
        }
        None
    }

    /// Signs the user out locally, tells the server in the background and
    /// sends the browser home.
    ///
    /// Never fails: if the regular clear errors, every storage key and
    /// cookie is wiped instead.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> LogoutOutcome {
        info!("Starting logout process");
        let token = self.store.get_token();

        if let Err(e) = self.store.sign_out() {
            error!("Logout error: {}", e);
            return self.force_logout();
        }

        let auth = Arc::clone(&self.auth);
        self.revoke = Some(tokio::spawn(async move {
            if let Err(e) = auth.revoke_session(token.as_deref()).await {
                debug!("Ignoring logout call failure: {}", e);
            }
        }));

        self.notify("Successfully logged out!", NotificationKind::Success);
        info!("User logged out successfully");

        if let Err(e) = self.render() {
            error!("Failed to render navigation after logout: {}", e);
        }

        let delay = self.config.navigation.logout_redirect_delay();
        self.redirect_home(delay);
        LogoutOutcome::Completed
    }

    fn force_logout(&mut self) -> LogoutOutcome {
        self.store.force_sign_out();
        self.dropdown = None;
        self.notify("Logged out successfully!", NotificationKind::Success);
        let delay = self.config.navigation.forced_logout_redirect_delay();
        self.redirect_home(delay);
        LogoutOutcome::Forced
    }

    /// Wipes all client state without trying a regular sign-out first and
    /// goes home immediately. No server call is made.
    #[instrument(skip(self))]
    pub fn quick_logout(&mut self) {
        info!("Quick logout");
        self.store.force_sign_out();
        self.dropdown = None;
        self.redirect_home(Duration::ZERO);
    }

    /// Waits for the server logout call started by [`Self::logout`], if any.
    pub async fn wait_for_revoke(&mut self) {
        if let Some(handle) = self.revoke.take() {
            if let Err(e) = handle.await {
                error!("Logout call task failed: {}", e);
            }
        }
    }

    /// Sends guests to the login page. Returns whether the caller may go on.
    pub fn require_auth(&mut self) -> bool {
        if self.store.is_logged_in() {
            return true;
        }
        self.notify("Please login to access this page", NotificationKind::Info);
        self.page.redirect(Redirect {
            href: LOGIN_PAGE.to_string(),
            delay: Duration::ZERO,
        });
        false
    }

    /// Sends signed-in users to their dashboard. Returns whether it redirected.
    pub fn redirect_if_logged_in(&mut self) -> bool {
        if !self.store.is_logged_in() {
            return false;
        }
        let Some(user) = self.store.get_user() else {
            return false;
        };
        let (href, _) = dashboard_for(&user);
        self.page.redirect(Redirect {
            href: href.to_string(),
            delay: Duration::ZERO,
        });
        true
    }

    fn notify(&mut self, message: &str, kind: NotificationKind) {
        let timeout = self.config.navigation.notification_timeout();
        self.page
            .show_notification(Notification::new(message, kind, timeout));
    }

    fn redirect_home(&mut self, delay: Duration) {
        self.page.redirect(Redirect {
            href: self.config.navigation.home_page.clone(),
            delay,
        });
    }
}
