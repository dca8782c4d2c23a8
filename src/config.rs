//! Environment-driven server configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TEMPLATE_PATH: &str = "static/policy_template.pdf";
pub const DEFAULT_CATALOG_PATH: &str = "static/models.json";
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 5 * 60;
/// Largest accepted JSON body.
pub const JSON_BODY_LIMIT: usize = 256 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub template_path: PathBuf,
    pub catalog_path: PathBuf,
    pub catalog_ttl: Duration,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            catalog_ttl: Duration::from_secs(DEFAULT_CATALOG_TTL_SECS),
            allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read the process environment (after `.env`, if any, has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup; unset or blank variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => parse_number("PORT", &value)?,
            None => defaults.port,
        };
        let catalog_ttl = match get("VEHICLE_CACHE_TTL_SECS") {
            Some(value) => Duration::from_secs(parse_number("VEHICLE_CACHE_TTL_SECS", &value)?),
            None => defaults.catalog_ttl,
        };
        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            template_path: get("TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_path),
            catalog_path: get("VEHICLE_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            catalog_ttl,
            allowed_origins,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}
