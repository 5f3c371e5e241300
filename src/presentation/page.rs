use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Lower-case name, also used as the CSS modifier class.
impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

/// Transient toast shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// Time after which the page dismisses it.
    pub timeout: Duration,
}

impl Notification {
    pub fn new(message: &str, kind: NotificationKind, timeout: Duration) -> Self {
        Self {
            message: message.to_string(),
            kind,
            timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub href: String,
    pub delay: Duration,
}

/// What the navigation controller needs from a page.
///
/// Selectors are the literal strings from the lookup chain (`.nav-link ul`,
/// `#navigation-menu`); element ids are bare (`user-dropdown`).
pub trait PageSurface {
    fn has_element(&self, selector: &str) -> bool;

    /// Replaces the inner markup of the element matched by `selector`.
    fn set_inner_html(&mut self, selector: &str, markup: &str);

    fn set_visible(&mut self, element_id: &str, visible: bool);

    /// Shows `notification`, removing any notification still on screen.
    fn show_notification(&mut self, notification: Notification);

    /// Navigates away once `redirect.delay` has elapsed.
    fn redirect(&mut self, redirect: Redirect);
}

/// Page model that records every effect, for headless use and tests.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    containers: BTreeMap<String, String>,
    visibility: HashMap<String, bool>,
    notification: Option<Notification>,
    notifications_shown: usize,
    redirects: Vec<Redirect>,
}

impl InMemoryPage {
    /// Page exposing the given container selectors, all empty.
    pub fn with_containers(selectors: &[&str]) -> Self {
        Self {
            containers: selectors
                .iter()
                .map(|selector| (selector.to_string(), String::new()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn markup(&self, selector: &str) -> Option<&str> {
        self.containers.get(selector).map(String::as_str)
    }

    pub fn is_visible(&self, element_id: &str) -> bool {
        self.visibility.get(element_id).copied().unwrap_or(false)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn notifications_shown(&self) -> usize {
        self.notifications_shown
    }

    pub fn redirects(&self) -> &[Redirect] {
        &self.redirects
    }

    pub fn last_redirect(&self) -> Option<&Redirect> {
        self.redirects.last()
    }
}

impl PageSurface for InMemoryPage {
    fn has_element(&self, selector: &str) -> bool {
        self.containers.contains_key(selector)
    }

    fn set_inner_html(&mut self, selector: &str, markup: &str) {
        if let Some(container) = self.containers.get_mut(selector) {
            *container = markup.to_string();
        }
    }

    fn set_visible(&mut self, element_id: &str, visible: bool) {
        self.visibility.insert(element_id.to_string(), visible);
    }

    fn show_notification(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.notifications_shown += 1;
    }

    fn redirect(&mut self, redirect: Redirect) {
        self.redirects.push(redirect);
    }
}
