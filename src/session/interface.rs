use crate::application::models::user::UserProfile;

/// Client-held authentication state as read back from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// A session is valid when it carries both an access token and a user.
    pub fn is_valid(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}
