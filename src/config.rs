use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Authentication
    pub session_timeout_seconds: u64,
    pub bcrypt_cost: u32,
    pub default_admin_username: String,
    pub default_admin_password: Option<String>,

    // Login rate limiting
    pub disable_rate_limiting: bool,
    pub login_rate_limit_per_second: u64,
    pub login_rate_limit_burst: u32,
    pub trust_proxy_headers: bool,

    // Listings
    pub recent_casts_limit: u64,

    // Application metadata
    pub deployment: Deployment,
}

/// Read an optional variable, falling back to `default` when unset or unparsable.
fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Defaults for everything except the database location.
    #[must_use]
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            session_timeout_seconds: 8 * 3600, // long shifts at sea
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_admin_username: "admin".to_string(),
            default_admin_password: None,
            disable_rate_limiting: false,
            login_rate_limit_per_second: 1,
            login_rate_limit_burst: 10,
            trust_proxy_headers: false,
            recent_casts_limit: 20,
            deployment: Deployment::Local,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set,
    /// and `ConfigError::Invalid` if a value is outside its accepted range.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::with_database_url(
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
        );

        let bcrypt_cost = var_or("BCRYPT_COST", defaults.bcrypt_cost);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!("{bcrypt_cost} is outside 4..=31"),
            });
        }

        Ok(Self {
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: var_or("API_PORT", defaults.api_port),

            session_timeout_seconds: var_or(
                "SESSION_TIMEOUT_SECONDS",
                defaults.session_timeout_seconds,
            ),
            bcrypt_cost,
            default_admin_username: env::var("DEFAULT_ADMIN_USERNAME")
                .unwrap_or(defaults.default_admin_username),
            default_admin_password: env::var("DEFAULT_ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),

            disable_rate_limiting: var_or("DISABLE_RATE_LIMITING", defaults.disable_rate_limiting),
            login_rate_limit_per_second: var_or(
                "LOGIN_RATE_LIMIT_PER_SECOND",
                defaults.login_rate_limit_per_second,
            ),
            login_rate_limit_burst: var_or("LOGIN_RATE_LIMIT_BURST", defaults.login_rate_limit_burst),
            trust_proxy_headers: var_or("TRUST_PROXY_HEADERS", defaults.trust_proxy_headers),

            recent_casts_limit: var_or("RECENT_CASTS_LIMIT", defaults.recent_casts_limit),

            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
            database_url: defaults.database_url,
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_aliases() {
        assert!(matches!(Deployment::from_str("Production"), Deployment::Prod));
        assert!(matches!(Deployment::from_str("staging"), Deployment::Stage));
        assert!(matches!(Deployment::from_str("anything"), Deployment::Local));
    }

    #[test]
    fn defaults_bind_on_all_interfaces() {
        let config = Config::with_database_url("sqlite::memory:");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.session_timeout_seconds, 28_800);
        assert!(config.default_admin_password.is_none());
        assert!(!config.trust_proxy_headers);
    }

    #[test]
    fn unset_variable_falls_back() {
        let value: u16 = var_or("CTD_LOG_TEST_SURELY_UNSET_VARIABLE", 42);
        assert_eq!(value, 42);
    }
}
