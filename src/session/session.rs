/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::models::user::UserProfile;
use crate::config::StorageConfig;
use crate::constants::{
    ACCESS_TOKEN_KEY, LEGACY_AUTHENTICATED_KEY, LEGACY_TOKEN_KEY, REFRESH_TOKEN_KEY,
    SESSION_COOKIES, USER_KEY,
};
use crate::error::AppError;
use crate::session::interface::Session;
use crate::storage::cookies::CookieJar;
use crate::storage::key_value::{FileStorage, KeyValueStore, MemoryStorage};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Persisted authentication state: access token, refresh token and the
/// cached user record.
///
/// Besides the persistent store it owns the session-scoped store and the
/// cookie jar, so that logout can wipe everything the client keeps.
#[derive(Debug)]
pub struct SessionStore {
    persistent: Arc<dyn KeyValueStore>,
    scoped: Arc<dyn KeyValueStore>,
    cookies: Arc<CookieJar>,
}

impl SessionStore {
    pub fn new(
        persistent: Arc<dyn KeyValueStore>,
        scoped: Arc<dyn KeyValueStore>,
        cookies: Arc<CookieJar>,
    ) -> Self {
        Self {
            persistent,
            scoped,
            cookies,
        }
    }

    /// Store backed by a JSON file, surviving process restarts.
    pub fn open(config: &StorageConfig) -> Result<Self, AppError> {
        let persistent = FileStorage::open(&config.path)?;
        Ok(Self::new(
            Arc::new(persistent),
            Arc::new(MemoryStorage::new()),
            Arc::new(CookieJar::new()),
        ))
    }

    /// Fully volatile store.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(MemoryStorage::new()),
            Arc::new(CookieJar::new()),
        )
    }

    pub fn persistent(&self) -> &Arc<dyn KeyValueStore> {
        &self.persistent
    }

    pub fn scoped(&self) -> &Arc<dyn KeyValueStore> {
        &self.scoped
    }

    pub fn cookies(&self) -> &Arc<CookieJar> {
        &self.cookies
    }

    pub fn get_token(&self) -> Option<String> {
        self.persistent.get_item(ACCESS_TOKEN_KEY)
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.persistent.get_item(REFRESH_TOKEN_KEY)
    }

    /// Cached user record. Malformed JSON is logged and reported as absent.
    pub fn get_user(&self) -> Option<UserProfile> {
        let raw = self.persistent.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                error!("Error parsing user data: {}", e);
                None
            }
        }
    }

    /// Writes the three session keys in order. A missing refresh token or
    /// user removes whatever was stored before.
    #[instrument(skip_all)]
    pub fn set_session(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
        user: Option<&Value>,
    ) -> Result<(), AppError> {
        self.persistent.set_item(ACCESS_TOKEN_KEY, access_token)?;
        match refresh_token {
            Some(refresh_token) => self.persistent.set_item(REFRESH_TOKEN_KEY, refresh_token)?,
            None => self.persistent.remove_item(REFRESH_TOKEN_KEY)?,
        }
        match user {
            Some(user) => self
                .persistent
                .set_item(USER_KEY, &serde_json::to_string(user)?)?,
            None => self.persistent.remove_item(USER_KEY)?,
        }
        debug!("Session stored");
        Ok(())
    }

    /// Snapshot of the stored session.
    pub fn load(&self) -> Session {
        Session {
            access_token: self.get_token(),
            refresh_token: self.get_refresh_token(),
            user: self.get_user(),
        }
    }

    /// A token (current or legacy key) and a readable user must both be
    /// present.
    pub fn is_logged_in(&self) -> bool {
        let has_token = self.get_token().is_some()
            || self.persistent.get_item(LEGACY_TOKEN_KEY).is_some();
        has_token && self.get_user().is_some()
    }

    /// Removes the three session keys.
    pub fn clear(&self) -> Result<(), AppError> {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            self.persistent.remove_item(key)?;
        }
        debug!("Session cleared");
        Ok(())
    }

    /// Removes the session keys and the legacy `token`/`isAuthenticated` keys.
    pub fn clear_all_keys(&self) -> Result<(), AppError> {
        self.persistent.remove_item(LEGACY_TOKEN_KEY)?;
        self.clear()?;
        self.persistent.remove_item(LEGACY_AUTHENTICATED_KEY)?;
        Ok(())
    }

    /// Regular sign-out: every session key, the session-scoped store and the
    /// session cookies.
    #[instrument(skip(self))]
    pub fn sign_out(&self) -> Result<(), AppError> {
        self.clear_all_keys()?;
        self.scoped.clear()?;
        for name in SESSION_COOKIES {
            self.cookies.expire(name);
        }
        Ok(())
    }

    /// Best-effort wipe of all client state: every persistent key, the
    /// session-scoped store and every cookie. Failures are logged only.
    #[instrument(skip(self))]
    pub fn force_sign_out(&self) {
        if let Err(e) = self.persistent.clear() {
            warn!("Failed to clear persistent storage: {}", e);
            for key in self.persistent.keys() {
                if let Err(e) = self.persistent.remove_item(&key) {
                    warn!("Failed to remove {}: {}", key, e);
                }
            }
        }
        if let Err(e) = self.scoped.clear() {
            warn!("Failed to clear session storage: {}", e);
        }
        self.cookies.expire_all();
    }
}
