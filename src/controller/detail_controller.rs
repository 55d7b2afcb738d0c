//! Detail lookup for a selected entry.

use crate::domain::PokemonName;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::PokemonDetail;
use crate::repositories::PokemonRepository;
use std::sync::Arc;

/// Fetches detail records for selected entries.
///
/// Lookups are independent of each other and of the list state; concurrent
/// calls may complete in any order.
pub struct DetailController {
    repository: Arc<dyn PokemonRepository>,
}

impl DetailController {
    pub fn new(repository: Arc<dyn PokemonRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the record for a display name such as `"Charizard"`.
    pub async fn get_pokemon_info(&self, name: &str) -> RepositoryResult<PokemonDetail> {
        let name = PokemonName::new(name).map_err(|e| RepositoryError::detail(e.to_string()))?;
        self.repository.get_pokemon_info(name.as_str()).await
    }
}
