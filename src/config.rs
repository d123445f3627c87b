use std::{env, time::Duration};

use crate::error::ConfigError;

/// Base URL used when `BLOODAID_API_URL` is not set in local mode.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Fixed request timeout applied to every client instance.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// ClientConfig
///
/// Holds the client's entire configuration state. Loaded once at startup and then
/// shared by value (it is cheap to clone) with every client built by the factory.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    // Base URL of the REST backend, without a trailing slash.
    pub api_url: String,
    // Applied to every request, connect included.
    pub timeout: Duration,
    // API key for the image host used by avatar/thumbnail uploads.
    pub imgbb_api_key: String,
    // Publishable key handed to the payment gateway.
    pub stripe_publishable_key: String,
    // Runtime environment marker. Controls log format and fail-fast checks.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context: local development tolerates missing keys,
/// production refuses to start without them.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for ClientConfig {
    /// Safe, non-failing values for test setup.
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            imgbb_api_key: "test-imgbb-key".to_string(),
            stripe_publishable_key: "pk_test_local".to_string(),
            env: Env::Local,
        }
    }
}

impl ClientConfig {
    /// load
    ///
    /// Reads all parameters from environment variables.
    ///
    /// # Errors
    /// In `Env::Production` every variable is mandatory and a missing one yields
    /// `ConfigError::Missing`. Local mode falls back to development defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let config = match env {
            Env::Local => Self {
                api_url: env::var("BLOODAID_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                timeout: DEFAULT_TIMEOUT,
                imgbb_api_key: env::var("IMGBB_API_KEY").unwrap_or_default(),
                stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
                env: Env::Local,
            },
            Env::Production => Self {
                api_url: required("BLOODAID_API_URL")?,
                timeout: DEFAULT_TIMEOUT,
                imgbb_api_key: required("IMGBB_API_KEY")?,
                stripe_publishable_key: required("STRIPE_PUBLISHABLE_KEY")?,
                env: Env::Production,
            },
        };

        Ok(config.normalized())
    }

    /// Builder-style override used by tests that point the client at a mock backend.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self.normalized()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn normalized(mut self) -> Self {
        while self.api_url.ends_with('/') {
            self.api_url.pop();
        }
        self
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            tracing::error!("{key} must be set in production");
            Err(ConfigError::Missing(key))
        }
    }
}
