/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/
use anyhow::Result;
use std::env;
use std::sync::Arc;
use tracing::{error, info};

use college_guide_client::{
    application::services::{
        api_client::ApiClient,
        auth_service::AuthService,
        college_service::CollegeService,
    },
    application::models::query::Pagination,
    config::Config,
    presentation::{controller::NavigationController, page::InMemoryPage},
    session::session::SessionStore,
    utils::logger::setup_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();

    // Reads CG_* environment variables, see src/config.rs
    let config = Arc::new(Config::new());
    info!("Configuration loaded: {}", config);

    let store = Arc::new(SessionStore::open(&config.storage)?);
    let api = ApiClient::from_config(&config, store.clone())?;
    let auth: Arc<dyn AuthService> = api.auth.clone();

    let page = InMemoryPage::with_containers(&[".nav-link ul"]);
    let mut nav = NavigationController::new(config.clone(), store, auth, page);
    nav.init()?;

    if !api.is_logged_in() {
        let email = env::var("CG_DEMO_EMAIL").unwrap_or_else(|_| "student@example.com".into());
        let password = env::var("CG_DEMO_PASSWORD").unwrap_or_default();
        match api.auth.login(&email, &password).await {
            Ok(result) => info!("{}", result.message.unwrap_or_default()),
            Err(e) => {
                error!("Login failed: {}", e);
                return Ok(());
            }
        }
        nav.render()?;
    }

    if let Some(user) = api.stored_user() {
        info!("Signed in as {} ({})", user.name, user.role);
    }
    info!(
        "Navigation:\n{}",
        nav.page().markup(".nav-link ul").unwrap_or_default()
    );

    let colleges = api.colleges.list_colleges(Pagination::default()).await?;
    info!(
        "Colleges: {}",
        serde_json::to_string_pretty(&colleges.data)?
    );

    nav.logout().await;
    nav.wait_for_revoke().await;
    if let Some(redirect) = nav.page().last_redirect() {
        info!("Redirecting to {} in {:?}", redirect.href, redirect.delay);
    }
    Ok(())
}
