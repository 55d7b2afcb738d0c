use crate::client::AsyncPokeApiClient;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{PokemonDetail, PokemonPage};
use crate::repositories::traits::PokemonRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Pokemon repository backed by the PokeAPI client.
///
/// Delegates every call to the AsyncPokeApiClient and folds its faults into
/// `RepositoryError`. List faults are logged and replaced by a generic
/// message; detail faults keep their text.
pub struct PokeApiPokemonRepository {
    client: Arc<dyn AsyncPokeApiClient>,
}

impl PokeApiPokemonRepository {
    /// Create a new repository with the given client.
    pub fn new(client: Arc<dyn AsyncPokeApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PokemonRepository for PokeApiPokemonRepository {
    async fn get_pokemon_list(&self, limit: usize, offset: usize) -> RepositoryResult<PokemonPage> {
        self.client.fetch_page(limit, offset).await.map_err(|e| {
            tracing::warn!(limit, offset, error = %e, "Pokemon list fetch failed");
            RepositoryError::ListUnavailable
        })
    }

    async fn get_pokemon_info(&self, name: &str) -> RepositoryResult<PokemonDetail> {
        self.client.fetch_detail(name).await.map_err(|e| {
            tracing::warn!(name, error = %e, "Pokemon detail fetch failed");
            RepositoryError::detail(e.to_string())
        })
    }

    async fn get_sprite(&self, url: &str) -> RepositoryResult<Vec<u8>> {
        self.client.fetch_bytes(url).await.map_err(|e| {
            tracing::debug!(url, error = %e, "Sprite download failed");
            RepositoryError::SpriteUnavailable(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PokeApiError, PokeApiResult};

    struct FailingClient;

    #[async_trait]
    impl AsyncPokeApiClient for FailingClient {
        async fn fetch_page(&self, _limit: usize, _offset: usize) -> PokeApiResult<PokemonPage> {
            Err(PokeApiError::HttpError("connection reset by peer".to_string()))
        }

        async fn fetch_detail(&self, name: &str) -> PokeApiResult<PokemonDetail> {
            Err(PokeApiError::NotFound(format!("pokemon/{}", name)))
        }

        async fn fetch_bytes(&self, _url: &str) -> PokeApiResult<Vec<u8>> {
            Err(PokeApiError::Timeout)
        }
    }

    fn repository() -> PokeApiPokemonRepository {
        PokeApiPokemonRepository::new(Arc::new(FailingClient))
    }

    #[tokio::test]
    async fn test_list_failure_hides_transport_details() {
        let err = repository().get_pokemon_list(20, 0).await.unwrap_err();
        assert_eq!(err, RepositoryError::ListUnavailable);
        assert!(!err.message().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_detail_failure_surfaces_message() {
        let err = repository().get_pokemon_info("missingno").await.unwrap_err();
        assert_eq!(err.message(), "Resource not found: pokemon/missingno");
    }

    #[tokio::test]
    async fn test_sprite_failure_is_tagged() {
        let err = repository().get_sprite("https://x/1.png").await.unwrap_err();
        assert_eq!(err, RepositoryError::SpriteUnavailable("Request timeout".to_string()));
    }
}
