use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            expires: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Renders the cookie as a `Set-Cookie` style assignment.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(expires) = self.expires {
            write!(f, "; expires={}", expires.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        write!(f, "; path={}", self.path)
    }
}

/// Cookie store. Expiry is an overwrite with an epoch expiry date, which is
/// how a page deletes cookies it does not own the lifetime of.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: Mutex<BTreeMap<String, Cookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Cookie>> {
        self.cookies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, cookie: Cookie) {
        self.lock().insert(cookie.name.clone(), cookie);
    }

    /// Value of a live cookie.
    pub fn get(&self, name: &str) -> Option<String> {
        let now = Utc::now();
        self.lock()
            .get(name)
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| cookie.value.clone())
    }

    pub fn cookie(&self, name: &str) -> Option<Cookie> {
        self.lock().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn expire(&self, name: &str) {
        let mut cookie = Cookie::new(name, "");
        cookie.expires = DateTime::from_timestamp(0, 0);
        debug!("Expiring cookie: {}", cookie);
        self.lock().insert(name.to_string(), cookie);
    }

    /// Expires every cookie currently in the jar.
    pub fn expire_all(&self) {
        for name in self.names() {
            self.expire(&name);
        }
    }
}
