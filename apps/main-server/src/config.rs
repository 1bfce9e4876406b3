//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL.
    pub database_url: String,
    /// Whether authentication is disabled (single-site/dev deployments).
    pub auth_disabled: bool,
    /// JWT secret (required when auth is enabled).
    pub jwt_secret: Option<String>,
    /// JWT expiration in hours.
    pub jwt_expiration_hours: u64,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let auth_disabled = env::var("DINEPASS_AUTH_DISABLED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(true);

        let jwt_secret = env::var("DINEPASS_JWT_SECRET").ok();
        if !auth_disabled && jwt_secret.is_none() {
            anyhow::bail!("DINEPASS_JWT_SECRET is required when auth is enabled");
        }

        Ok(Self {
            host: env::var("DINEPASS_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("DINEPASS_SERVER_PORT")
                .unwrap_or_else(|_| "8640".to_string())
                .parse()
                .unwrap_or(8640),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:dinepass.db?mode=rwc".to_string()),
            auth_disabled,
            jwt_secret,
            jwt_expiration_hours: env::var("DINEPASS_JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),
            log_level: env::var("DINEPASS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if authentication should be enforced.
    pub fn auth_enabled(&self) -> bool {
        !self.auth_disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_auth_disabled() {
        // Clear any existing env vars
        // SAFETY: Tests run serially or in isolation
        unsafe {
            env::remove_var("DINEPASS_AUTH_DISABLED");
            env::remove_var("DINEPASS_JWT_SECRET");
        }

        let config = Config::from_env().unwrap();
        assert!(config.auth_disabled);
        assert!(!config.auth_enabled());
    }
}
