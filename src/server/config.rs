//! Application configuration loaded from environment variables.

use std::str::FromStr;

use crate::server::error::config::ConfigError;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_PAGE_SIZE: u64 = 6;
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;
pub const DEFAULT_INGREDIENT_SEARCH_PARAM: &str = "name";
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Settings consumed by API handlers and services.
///
/// Held by [`AppState`](crate::server::model::app::AppState) and passed explicitly to the
/// components that need it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Number of items per page when no `limit` is requested
    pub page_size: u64,
    /// Upper bound applied to the `limit` query parameter
    pub max_page_size: u64,
    /// Query parameter used for ingredient prefix search
    pub ingredient_search_param: String,
    /// Maximum size of a decoded recipe image
    pub max_image_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            ingredient_search_param: DEFAULT_INGREDIENT_SEARCH_PARAM.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and every optional variable valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `VALKEY_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - An optional variable could not be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration using the provided lookup for variable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size = parse_or(&lookup, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let max_page_size = parse_or(&lookup, "MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)?;

        if page_size == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "PAGE_SIZE".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if max_page_size < page_size {
            return Err(ConfigError::InvalidEnvValue {
                var: "MAX_PAGE_SIZE".to_string(),
                reason: format!("must be at least PAGE_SIZE ({})", page_size),
            });
        }

        let ingredient_search_param = lookup("INGREDIENT_SEARCH_PARAM")
            .unwrap_or_else(|| DEFAULT_INGREDIENT_SEARCH_PARAM.to_string());
        if ingredient_search_param.trim().is_empty() {
            return Err(ConfigError::InvalidEnvValue {
                var: "INGREDIENT_SEARCH_PARAM".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            valkey_url: required(&lookup, "VALKEY_URL")?,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            api: ApiConfig {
                page_size,
                max_page_size,
                ingredient_search_param,
                max_image_bytes: parse_or(&lookup, "MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?,
            },
        })
    }
}

fn required<F>(lookup: &F, var: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}
