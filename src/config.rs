use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_FORCED_LOGOUT_REDIRECT_DELAY_MS, DEFAULT_HOME_PAGE,
    DEFAULT_LOGOUT_REDIRECT_DELAY_MS, DEFAULT_NOTIFICATION_TIMEOUT_MS, DEFAULT_STORAGE_PATH,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub rest_api: RestApiConfig,
    pub storage: StorageConfig,
    pub navigation: NavigationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NavigationConfig {
    pub home_page: String,
    pub logout_redirect_delay_ms: u64,
    pub forced_logout_redirect_delay_ms: u64,
    pub notification_timeout_ms: u64,
}

impl NavigationConfig {
    pub fn logout_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.logout_redirect_delay_ms)
    }

    pub fn forced_logout_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.forced_logout_redirect_delay_ms)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"rest_api\":{},\"storage\":{},\"navigation\":{}}}",
            self.rest_api, self.storage, self.navigation
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"base_url\":\"{}\"}}", self.base_url)
    }
}

impl fmt::Display for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"path\":\"{}\"}}", self.path.display())
    }
}

impl fmt::Display for NavigationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"home_page\":\"{}\",\"logout_redirect_delay_ms\":{},\"forced_logout_redirect_delay_ms\":{},\"notification_timeout_ms\":{}}}",
            self.home_page,
            self.logout_redirect_delay_ms,
            self.forced_logout_redirect_delay_ms,
            self.notification_timeout_ms
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            rest_api: RestApiConfig {
                base_url: get_env_or_default("CG_REST_BASE_URL", String::from(DEFAULT_BASE_URL)),
            },
            storage: StorageConfig {
                path: get_env_or_default("CG_STORAGE_PATH", PathBuf::from(DEFAULT_STORAGE_PATH)),
            },
            navigation: NavigationConfig {
                home_page: get_env_or_default("CG_HOME_PAGE", String::from(DEFAULT_HOME_PAGE)),
                logout_redirect_delay_ms: get_env_or_default(
                    "CG_LOGOUT_REDIRECT_DELAY_MS",
                    DEFAULT_LOGOUT_REDIRECT_DELAY_MS,
                ),
                forced_logout_redirect_delay_ms: get_env_or_default(
                    "CG_FORCED_LOGOUT_REDIRECT_DELAY_MS",
                    DEFAULT_FORCED_LOGOUT_REDIRECT_DELAY_MS,
                ),
                notification_timeout_ms: get_env_or_default(
                    "CG_NOTIFICATION_TIMEOUT_MS",
                    DEFAULT_NOTIFICATION_TIMEOUT_MS,
                ),
            },
        }
    }

    /// Default configuration pointed at another backend, used by tests and demos.
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Self::new();
        config.rest_api.base_url = base_url.to_string();
        config
    }
}

#[cfg(test)]
mod tests_config {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 6] = [
        "CG_REST_BASE_URL",
        "CG_STORAGE_PATH",
        "CG_HOME_PAGE",
        "CG_LOGOUT_REDIRECT_DELAY_MS",
        "CG_FORCED_LOGOUT_REDIRECT_DELAY_MS",
        "CG_NOTIFICATION_TIMEOUT_MS",
    ];

    fn with_env_vars<F>(vars: Vec<(&str, &str)>, test: F)
    where
        F: FnOnce(),
    {
        let _lock = ENV_MUTEX.lock().unwrap();
        let old_vars: Vec<(&str, Option<String>)> =
            VARS.iter().map(|key| (*key, env::var(key).ok())).collect();

        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }

        test();

        for (key, value) in old_vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    #[test]
    fn test_config_new() {
        with_env_vars(
            vec![
                ("CG_REST_BASE_URL", "https://guide.example.com/api"),
                ("CG_STORAGE_PATH", "/tmp/session.json"),
                ("CG_HOME_PAGE", "home.html"),
                ("CG_LOGOUT_REDIRECT_DELAY_MS", "250"),
                ("CG_FORCED_LOGOUT_REDIRECT_DELAY_MS", "100"),
                ("CG_NOTIFICATION_TIMEOUT_MS", "5000"),
            ],
            || {
                let config = Config::new();

                assert_eq!(config.rest_api.base_url, "https://guide.example.com/api");
                assert_eq!(config.storage.path, PathBuf::from("/tmp/session.json"));
                assert_eq!(config.navigation.home_page, "home.html");
                assert_eq!(
                    config.navigation.logout_redirect_delay(),
                    Duration::from_millis(250)
                );
                assert_eq!(
                    config.navigation.forced_logout_redirect_delay(),
                    Duration::from_millis(100)
                );
                assert_eq!(config.navigation.notification_timeout_ms, 5000);
            },
        );
    }

    #[test]
    fn test_default_values() {
        with_env_vars(vec![], || {
            let config = Config::new();

            assert_eq!(config.rest_api.base_url, "http://localhost:5001/api");
            assert_eq!(
                config.storage.path,
                PathBuf::from("college_guide_session.json")
            );
            assert_eq!(config.navigation.home_page, "index.html");
            assert_eq!(config.navigation.logout_redirect_delay_ms, 1000);
            assert_eq!(config.navigation.forced_logout_redirect_delay_ms, 500);
            assert_eq!(config.navigation.notification_timeout_ms, 3000);
        });
    }

    #[test]
    fn test_unparseable_value_falls_back_to_default() {
        with_env_vars(vec![("CG_LOGOUT_REDIRECT_DELAY_MS", "soon")], || {
            let config = Config::new();
            assert_eq!(config.navigation.logout_redirect_delay_ms, 1000);
        });
    }
}
