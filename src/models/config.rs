//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::{DEFAULT_ALL_UPPER_BOUND, DEFAULT_ITEMS_PER_PAGE};

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_all_upper_bound() -> usize {
    DEFAULT_ALL_UPPER_BOUND
}

/// Settings shared by the API client and the list controllers.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_all_upper_bound")]
    pub all_page_upper_bound: usize,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_secs: default_timeout(),
            default_page_size: default_page_size(),
            all_page_upper_bound: default_all_upper_bound(),
        }
    }

    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml`
    /// profile and `APP_`-prefixed environment variables, in that order.
    #[cfg(feature = "http")]
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        Self::load_from("config", app_env)
    }

    #[cfg(feature = "http")]
    pub fn load_from(dir: &str, app_env: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        let parsed = settings.try_deserialize::<ClientConfig>()?;
        if parsed.default_page_size == 0 {
            return Err(config::ConfigError::Message(
                "default_page_size must be greater than zero".to_string(),
            ));
        }
        Ok(parsed)
    }
}
