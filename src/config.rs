//! Configuration management for the Pokedex core.
//!
//! Every setting has a default, so an empty environment yields a working
//! configuration pointed at the public PokeAPI.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default PokeAPI base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Default base for sprite image URLs; `<base>/<id>.png`.
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Default number of entries requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration for the Pokedex core.
#[derive(Debug, Clone)]
pub struct Config {
    /// PokeAPI base URL
    pub api_base_url: String,

    /// Base URL sprite images are derived from
    pub sprite_base_url: String,

    /// Entries requested per page (default: 20)
    pub page_size: usize,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `POKEAPI_BASE_URL`: Base URL for PokeAPI
    /// - `POKEDEX_SPRITE_BASE_URL`: Base URL for sprite images
    /// - `POKEDEX_PAGE_SIZE`: Entries per page (default: 20)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();

        let api_base_url =
            env::var("POKEAPI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::validate_url("POKEAPI_BASE_URL", &api_base_url)?;

        let sprite_base_url = env::var("POKEDEX_SPRITE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SPRITE_BASE_URL.to_string());
        Self::validate_url("POKEDEX_SPRITE_BASE_URL", &sprite_base_url)?;

        let page_size = Self::parse_env_usize("POKEDEX_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "POKEDEX_PAGE_SIZE".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            sprite_base_url,
            page_size,
            request_timeout,
            log_level,
        })
    }

    fn validate_url(var_name: &str, value: &str) -> ConfigResult<()> {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
