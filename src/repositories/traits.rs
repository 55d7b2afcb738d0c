use crate::error::RepositoryResult;
use crate::models::{PokemonDetail, PokemonPage};
use async_trait::async_trait;

/// Repository for Pokemon data.
///
/// Every operation returns a tagged result: the payload, or a
/// `RepositoryError` carrying the message to show. Implementations must
/// convert all transport faults; nothing else may escape.
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Retrieve one page of the list.
    ///
    /// Failures always carry the same generic message.
    async fn get_pokemon_list(&self, limit: usize, offset: usize) -> RepositoryResult<PokemonPage>;

    /// Retrieve the detail record of one Pokemon.
    ///
    /// Failures carry the underlying fault's message when there is one.
    async fn get_pokemon_info(&self, name: &str) -> RepositoryResult<PokemonDetail>;

    /// Download a sprite image.
    async fn get_sprite(&self, url: &str) -> RepositoryResult<Vec<u8>>;
}
