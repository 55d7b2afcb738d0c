//! HTTP client for PokeAPI.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client maps transport and status failures to
//! `PokeApiError` and never retries.

mod async_wrapper;
pub use async_wrapper::{AsyncPokeApiClient, AsyncPokeApiClientImpl};

use crate::config::Config;
use crate::domain::PokemonName;
use crate::error::{PokeApiError, PokeApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{PokemonDetail, PokemonPage};
use std::error::Error as _;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a downloaded sprite; PokeAPI sprites are a few KiB.
pub const MAX_SPRITE_BYTES: u64 = 4 * 1024 * 1024;

/// HTTP client for PokeAPI.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct PokeApiClient {
    /// Base URL for the API, e.g. `https://pokeapi.co/api/v2/`
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl PokeApiClient {
    /// Create a new PokeApiClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a PokeApiClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request against an absolute URL.
    fn get(&self, url: &str) -> Result<ureq::Response, PokeApiError> {
        tracing::debug!("GET {}", url);
        let timer = HttpTimer::start(&self.metrics);

        let result = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        let duration = timer.finish(result.is_err());
        match &result {
            Ok(response) => {
                tracing::debug!("GET {} - {} in {:?}", url, response.status(), duration)
            }
            Err(e) => tracing::debug!("GET {} - Error: {}", url, e),
        }

        result
    }

    /// Map a ureq error to a PokeApiError.
    fn map_error(&self, error: ureq::Error) -> PokeApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let url = response.get_url().to_string();
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => PokeApiError::NotFound(url),
                    429 => PokeApiError::RateLimitExceeded,
                    _ => PokeApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    PokeApiError::HttpError("Connection failed".to_string())
                } else if is_timeout(&transport) {
                    PokeApiError::Timeout
                } else {
                    PokeApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch one page of the Pokemon list.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of entries to return
    /// * `offset` - Number of entries to skip
    pub fn fetch_page(&self, limit: usize, offset: usize) -> PokeApiResult<PokemonPage> {
        let url = self.build_url(&format!("/pokemon?limit={}&offset={}", limit, offset));
        let body = self
            .get(&url)?
            .into_string()
            .map_err(|e| PokeApiError::HttpError(e.to_string()))?;

        let page: PokemonPage = serde_json::from_str(&body)?;
        self.metrics.record_entries_listed(page.results.len());
        Ok(page)
    }

    /// Fetch the detail record of one Pokemon.
    ///
    /// The name is trimmed and lower-cased first; PokeAPI paths are case-sensitive.
    pub fn fetch_detail(&self, name: &str) -> PokeApiResult<PokemonDetail> {
        let name =
            PokemonName::new(name).map_err(|e| PokeApiError::InvalidRequest(e.to_string()))?;
        let url = self.build_url(&format!(
            "/pokemon/{}",
            urlencoding::encode(name.as_str())
        ));
        let body = self
            .get(&url)?
            .into_string()
            .map_err(|e| PokeApiError::HttpError(e.to_string()))?;

        let detail: PokemonDetail = serde_json::from_str(&body)?;
        self.metrics.record_detail_fetched();
        Ok(detail)
    }

    /// Download raw bytes from an absolute URL (sprite images).
    pub fn fetch_bytes(&self, url: &str) -> PokeApiResult<Vec<u8>> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PokeApiError::InvalidRequest(format!(
                "Not an absolute URL: {}",
                url
            )));
        }

        let response = self.get(url)?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_SPRITE_BYTES + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| PokeApiError::HttpError(e.to_string()))?;

        if bytes.len() as u64 > MAX_SPRITE_BYTES {
            tracing::debug!("GET {} - body exceeds {} bytes", url, MAX_SPRITE_BYTES);
            return Err(PokeApiError::HttpError(format!(
                "Response body exceeds {} bytes",
                MAX_SPRITE_BYTES
            )));
        }

        self.metrics.record_sprite_bytes(bytes.len());
        Ok(bytes)
    }
}

/// Whether an I/O transport failure was the agent's timeout firing.
fn is_timeout(transport: &ureq::Transport) -> bool {
    if transport.kind() != ureq::ErrorKind::Io {
        return false;
    }
    transport
        .source()
        .and_then(|e| e.downcast_ref::<std::io::Error>())
        .map(|e| {
            matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
        .unwrap_or(false)
}
