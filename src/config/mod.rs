use crate::result::error::ConfigError;
use common::config::ConfigLoader;
use serde::{self, Deserialize};
use std::time::Duration;
use validator::Validate;

/// Settings shared by every part of the harness. Passed explicitly to the
/// client and the runner at construction.
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct HarnessConfig {
    /// Service root including the `/api` prefix,
    /// e.g. `https://stellarburgers.nomoreparties.site/api`.
    #[validate(url)]
    pub base_url: String,

    /// Upper bound for a single HTTP call. Expiry fails the scenario.
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,

    /// Retries for transient failures. Zero keeps contract runs deterministic.
    #[serde(default)]
    #[validate(range(max = 5))]
    pub max_retries: u32,

    /// Scenarios executed at the same time. One means sequential.
    #[serde(default = "default_concurrency")]
    #[validate(range(min = 1, max = 64))]
    pub concurrency: usize,

    #[serde(default = "default_email_domain")]
    #[validate(length(min = 1))]
    pub email_domain: String,

    #[serde(default = "default_password")]
    #[validate(length(min = 1))]
    pub default_password: String,

    #[serde(default = "default_user_name")]
    #[validate(length(min = 1))]
    pub default_user_name: String,

    /// Raises the log level from WARN to INFO.
    #[serde(default)]
    pub verbose: bool,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_concurrency() -> usize {
    1
}

fn default_email_domain() -> String {
    "yandex.ru".to_owned()
}

fn default_password() -> String {
    "testPassword".to_owned()
}

fn default_user_name() -> String {
    "New Username21".to_owned()
}

impl HarnessConfig {
    /// Config pointing at `base_url` with every other field at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: 0,
            concurrency: default_concurrency(),
            email_domain: default_email_domain(),
            default_password: default_password(),
            default_user_name: default_user_name(),
            verbose: false,
        }
    }

    /// Reads the environment (and `.env*` files) and validates the result.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = ConfigLoader::load_default()?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
