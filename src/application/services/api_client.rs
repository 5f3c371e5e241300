use std::sync::Arc;

use crate::{
    application::{
        models::user::UserProfile,
        services::{
            admin_service::AdminServiceImpl, auth_service::AuthServiceImpl,
            college_service::CollegeServiceImpl, course_service::CourseServiceImpl,
            mark_service::MarkServiceImpl,
        },
    },
    config::Config,
    error::AppError,
    session::session::SessionStore,
    transport::http_client::{HttpClient, RestHttpClient},
};

/// All backend services sharing one transport and one session store.
///
/// Built explicitly and handed to whatever needs it; there is no global
/// instance.
pub struct ApiClient<T: HttpClient> {
    pub auth: Arc<AuthServiceImpl<T>>,
    pub colleges: CollegeServiceImpl<T>,
    pub courses: CourseServiceImpl<T>,
    pub marks: MarkServiceImpl<T>,
    pub admin: AdminServiceImpl<T>,
    store: Arc<SessionStore>,
}

impl ApiClient<RestHttpClient> {
    /// Client for the backend named in `config`.
    pub fn from_config(config: &Config, store: Arc<SessionStore>) -> Result<Self, AppError> {
        let client = RestHttpClient::new(&config.rest_api.base_url)?;
        Ok(Self::new(Arc::new(client), store))
    }
}

impl<T: HttpClient> ApiClient<T> {
    pub fn new(client: Arc<T>, store: Arc<SessionStore>) -> Self {
        Self {
            auth: Arc::new(AuthServiceImpl::new(client.clone(), store.clone())),
            colleges: CollegeServiceImpl::new(client.clone(), store.clone()),
            courses: CourseServiceImpl::new(client.clone(), store.clone()),
            marks: MarkServiceImpl::new(client.clone(), store.clone()),
            admin: AdminServiceImpl::new(client, store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn is_logged_in(&self) -> bool {
        self.store.is_logged_in()
    }

    pub fn stored_user(&self) -> Option<UserProfile> {
        self.store.get_user()
    }
}
