//! Async wrapper around the synchronous PokeApiClient.
//!
//! Each call runs on tokio's blocking pool via `tokio::task::spawn_blocking`,
//! so a slow request never stalls the thread driving the UI state.

use crate::client::PokeApiClient;
use crate::error::{PokeApiError, PokeApiResult};
use crate::metrics::Metrics;
use crate::models::{PokemonDetail, PokemonPage};
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface to PokeAPI.
#[async_trait]
pub trait AsyncPokeApiClient: Send + Sync {
    async fn fetch_page(&self, limit: usize, offset: usize) -> PokeApiResult<PokemonPage>;
    async fn fetch_detail(&self, name: &str) -> PokeApiResult<PokemonDetail>;
    async fn fetch_bytes(&self, url: &str) -> PokeApiResult<Vec<u8>>;
}

/// Async wrapper around PokeApiClient.
#[derive(Clone)]
pub struct AsyncPokeApiClientImpl {
    client: Arc<PokeApiClient>,
}

impl AsyncPokeApiClientImpl {
    pub fn new(client: PokeApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Metrics of the wrapped client.
    pub fn metrics(&self) -> &Metrics {
        self.client.metrics()
    }
}

fn join_error(e: tokio::task::JoinError) -> PokeApiError {
    PokeApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncPokeApiClient for AsyncPokeApiClientImpl {
    async fn fetch_page(&self, limit: usize, offset: usize) -> PokeApiResult<PokemonPage> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.fetch_page(limit, offset))
            .await
            .map_err(join_error)?
    }

    async fn fetch_detail(&self, name: &str) -> PokeApiResult<PokemonDetail> {
        let client = self.client.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || client.fetch_detail(&name))
            .await
            .map_err(join_error)?
    }

    async fn fetch_bytes(&self, url: &str) -> PokeApiResult<Vec<u8>> {
        let client = self.client.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || client.fetch_bytes(&url))
            .await
            .map_err(join_error)?
    }
}
