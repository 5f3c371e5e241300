//! Navigation state and its declarative markup.
//!
//! The menu is a pure function of [`NavState`]: build a [`NavigationView`]
//! and render it through the askama templates below, no DOM involved.

use askama::Template;

use crate::application::models::user::UserProfile;
use crate::constants::{
    ADMIN_PAGE, DASHBOARD_PAGE, LOGIN_PAGE, LOGOUT_BUTTON_ID, USER_DROPDOWN_ID,
    USER_MENU_TOGGLE_ID,
};
use crate::error::AppError;
use crate::session::session::SessionStore;

const LINK_CLASS: &str = "hover-link";
const SIGNUP_CLASS: &str = "hover-link secondary-button";
const LOGIN_CLASS: &str = "hover-link primary-button";

#[derive(Debug, Clone, PartialEq)]
pub enum NavState {
    Guest,
    Authenticated(UserProfile),
}

impl NavState {
    pub fn from_store(store: &SessionStore) -> Self {
        if store.is_logged_in() {
            if let Some(user) = store.get_user() {
                return NavState::Authenticated(user);
            }
        }
        NavState::Guest
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, NavState::Authenticated(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    pub class: &'static str,
}

impl NavLink {
    fn new(href: &str, label: &str) -> Self {
        Self::styled(href, label, LINK_CLASS)
    }

    fn styled(href: &str, label: &str, class: &'static str) -> Self {
        Self {
            href: href.to_string(),
            label: label.to_string(),
            class,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownItem {
    pub href: String,
    pub label: String,
    /// Element id, empty when the item needs none.
    pub id: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserMenu {
    pub user_name: String,
    pub items: Vec<DropdownItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationView {
    pub links: Vec<NavLink>,
    pub user_menu: Option<UserMenu>,
}

/// Landing page and label of the user's dashboard.
pub(crate) fn dashboard_for(user: &UserProfile) -> (&'static str, &'static str) {
    if user.is_admin() {
        (ADMIN_PAGE, "Admin Panel")
    } else {
        (DASHBOARD_PAGE, "Dashboard")
    }
}

impl NavigationView {
    pub fn for_state(state: &NavState) -> Self {
        match state {
            NavState::Guest => Self::guest(),
            NavState::Authenticated(user) => Self::authenticated(user),
        }
    }

    pub fn guest() -> Self {
        Self {
            links: vec![
                NavLink::new("index.html", "Home"),
                NavLink::new("college.html", "Colleges"),
                NavLink::new("AfterSEE.html", "After SEE"),
                NavLink::new("Afterinter.html", "After +2"),
                NavLink::new("checkrequirement.html", "Requirements"),
                NavLink::new("contact.html", "Contact"),
                NavLink::new("help.html", "Help"),
                NavLink::styled("signup.html", "Sign up", SIGNUP_CLASS),
                NavLink::styled(LOGIN_PAGE, "Login", LOGIN_CLASS),
            ],
            user_menu: None,
        }
    }

    pub fn authenticated(user: &UserProfile) -> Self {
        let (dashboard_href, dashboard_label) = dashboard_for(user);

        let mut links = vec![
            NavLink::new("index.html", "Home"),
            NavLink::new("college.html", "Colleges"),
            NavLink::new(dashboard_href, dashboard_label),
        ];
        if user.is_student() {
            links.push(NavLink::new("profile.html", "Profile"));
            links.push(NavLink::new("AfterSEE.html", "After SEE"));
            links.push(NavLink::new("Afterinter.html", "After +2"));
        }
        links.push(NavLink::new("contact.html", "Contact"));
        links.push(NavLink::new("help.html", "Help"));

        let items = vec![
            DropdownItem {
                href: "profile.html".to_string(),
                label: "👤 My Profile".to_string(),
                id: "",
            },
            DropdownItem {
                href: dashboard_href.to_string(),
                label: format!("📊 {dashboard_label}"),
                id: "",
            },
            DropdownItem {
                href: "#".to_string(),
                label: "🚪 Logout".to_string(),
                id: LOGOUT_BUTTON_ID,
            },
        ];

        Self {
            links,
            user_menu: Some(UserMenu {
                user_name: user.name.clone(),
                items,
            }),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.label.as_str()).collect()
    }

    pub fn has_link(&self, label: &str) -> bool {
        self.links.iter().any(|link| link.label == label)
    }

    /// Renders the `<li>` list that goes inside the navigation container.
    pub fn render(&self) -> Result<String, AppError> {
        let markup = match &self.user_menu {
            None => GuestNavTemplate { view: self }.render()?,
            Some(menu) => AuthenticatedNavTemplate {
                view: self,
                menu,
                toggle_id: USER_MENU_TOGGLE_ID,
                dropdown_id: USER_DROPDOWN_ID,
            }
            .render()?,
        };
        Ok(markup)
    }
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"{% for link in view.links %}<li><a href="{{ link.href }}" class="{{ link.class }}">{{ link.label }}</a></li>
{% endfor %}"##
)]
struct GuestNavTemplate<'a> {
    view: &'a NavigationView,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"{% for link in view.links %}<li><a href="{{ link.href }}" class="{{ link.class }}">{{ link.label }}</a></li>
{% endfor %}<li class="user-menu">
<a href="#" class="hover-link secondary-button user-dropdown-toggle" id="{{ toggle_id }}">👤 {{ menu.user_name }} ▼</a>
<div class="user-dropdown" id="{{ dropdown_id }}" style="display: none;">
{% for item in menu.items %}<a href="{{ item.href }}" class="dropdown-item"{% if !item.id.is_empty() %} id="{{ item.id }}"{% endif %}>{{ item.label }}</a>
{% endfor %}</div>
</li>
"##
)]
struct AuthenticatedNavTemplate<'a> {
    view: &'a NavigationView,
    menu: &'a UserMenu,
    toggle_id: &'a str,
    dropdown_id: &'a str,
}
