//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub gateway: GatewayConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" | "test" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration (REST and socket share one listener)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Built client served as a fallback in production
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry: i64,
}

/// Rate limiting configuration for the auth routes
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Realtime gateway tuning
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,
    #[serde(default = "default_heartbeat_timeout_ms")]
    pub heartbeat_timeout_ms: u64,
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
    #[serde(default = "default_message_buffer")]
    pub message_buffer: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
            heartbeat_timeout_ms: default_heartbeat_timeout_ms(),
            handshake_timeout_ms: default_handshake_timeout_ms(),
            message_buffer: default_message_buffer(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "virtualrpg".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_run_migrations() -> bool {
    true
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_token_expiry() -> i64 {
    604_800 // 7 days
}

fn default_requests_per_second() -> u32 {
    5
}

fn default_burst() -> u32 {
    20
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5174".to_string()]
}

fn default_heartbeat_interval_ms() -> u64 {
    25_000
}

fn default_heartbeat_timeout_ms() -> u64 {
    60_000
}

fn default_handshake_timeout_ms() -> u64 {
    10_000
}

fn default_message_buffer() -> usize {
    100
}

const DEV_ACCESS_SECRET: &str = "dev-access-secret-change-me";
const DEV_REFRESH_SECRET: &str = "dev-refresh-secret-change-me";

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|value| {
                Environment::parse(&value).ok_or(ConfigError::InvalidValue("APP_ENV", value))
            })
            .transpose()?
            .unwrap_or_default();

        let allowed_origins = lookup("CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "PORT", default_port())?,
                static_dir: lookup("STATIC_DIR").unwrap_or_else(default_static_dir),
            },
            database: DatabaseConfig {
                url: database_url(&lookup)?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections())?,
                run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", default_run_migrations())?,
            },
            jwt: JwtConfig {
                access_secret: secret(&lookup, "JWT_SECRET", env, DEV_ACCESS_SECRET)?,
                refresh_secret: secret(&lookup, "JWT_REFRESH_SECRET", env, DEV_REFRESH_SECRET)?,
                access_token_expiry: parse_or(&lookup, "JWT_ACCESS_EXPIRY", default_access_token_expiry())?,
                refresh_token_expiry: parse_or(&lookup, "JWT_REFRESH_EXPIRY", default_refresh_token_expiry())?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(&lookup, "RATE_LIMIT_PER_SECOND", default_requests_per_second())?,
                burst: parse_or(&lookup, "RATE_LIMIT_BURST", default_burst())?,
            },
            cors: CorsConfig { allowed_origins },
            gateway: GatewayConfig {
                heartbeat_interval_ms: parse_or(&lookup, "GATEWAY_HEARTBEAT_INTERVAL_MS", default_heartbeat_interval_ms())?,
                heartbeat_timeout_ms: parse_or(&lookup, "GATEWAY_HEARTBEAT_TIMEOUT_MS", default_heartbeat_timeout_ms())?,
                handshake_timeout_ms: parse_or(&lookup, "GATEWAY_HANDSHAKE_TIMEOUT_MS", default_handshake_timeout_ms())?,
                message_buffer: parse_or(&lookup, "GATEWAY_MESSAGE_BUFFER", default_message_buffer())?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default),
    }
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the `DB_*` parts.
/// User and password are percent-encoded so reserved characters stay in the userinfo.
fn database_url<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        return Ok(url);
    }

    let name = lookup("DB_NAME").ok_or(ConfigError::MissingVar("DATABASE_URL"))?;
    let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port: u16 = parse_or(lookup, "DB_PORT", 5432)?;
    let user = lookup("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let user = utf8_percent_encode(&user, NON_ALPHANUMERIC);
    let credentials = match lookup("DB_PASSWORD") {
        Some(password) if !password.is_empty() => {
            format!("{user}:{}", utf8_percent_encode(&password, NON_ALPHANUMERIC))
        }
        _ => user.to_string(),
    };

    Ok(format!("postgres://{credentials}@{host}:{port}/{name}"))
}

fn secret<F>(
    lookup: &F,
    key: &'static str,
    env: Environment,
    dev_fallback: &str,
) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ if env.is_production() => Err(ConfigError::MissingVar(key)),
        _ => {
            tracing::warn!(var = key, "Secret not set, using development fallback");
            Ok(dev_fallback.to_string())
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
