use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing settings, read once at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_hours")]
    pub refresh_token_ttl_hours: i64,
}

/// Upper bound for the access token lifetime (one day).
const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 24 * 60;

/// Upper bound for the refresh token lifetime (one year).
const MAX_REFRESH_TOKEN_TTL_HOURS: i64 = 365 * 24;

fn default_max_connections() -> u32 {
    5
}

fn default_issuer() -> String {
    auth::jwt::DEFAULT_ISSUER.to_string()
}

fn default_access_token_ttl_minutes() -> i64 {
    auth::authenticator::ACCESS_TOKEN_TTL_MINUTES
}

fn default_refresh_token_ttl_hours() -> i64 {
    auth::authenticator::REFRESH_TOKEN_TTL_HOURS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Reject token lifetimes that would issue already-expired tokens or
    /// overflow the clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ACCESS_TOKEN_TTL_MINUTES).contains(&self.access_token_ttl_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_minutes must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_TTL_MINUTES, self.access_token_ttl_minutes
            )));
        }

        if !(1..=MAX_REFRESH_TOKEN_TTL_HOURS).contains(&self.refresh_token_ttl_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.refresh_token_ttl_hours must be between 1 and {}, got {}",
                MAX_REFRESH_TOKEN_TTL_HOURS, self.refresh_token_ttl_hours
            )));
        }

        Ok(())
    }
}
