//! Paginated list payload and the list entries built from it.

use crate::domain::pokemon_name::capitalize;
use crate::domain::{ResourceId, ValidationError};
use crate::models::NamedResource;
use serde::{Deserialize, Serialize};

/// One page of `GET /pokemon?limit=&offset=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonPage {
    /// Total number of entries available upstream
    pub count: usize,

    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,

    /// Entries of this page, in dex order
    pub results: Vec<NamedResource>,
}

/// An entry of the browsable list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PokemonListEntry {
    /// Display name (first letter capitalized)
    pub name: String,

    /// Sprite image URL derived from `number`
    pub image_url: String,

    /// Dex number parsed from the detail URL
    pub number: u32,
}

impl PokemonListEntry {
    /// Build an entry from a raw `{name, url}` pair.
    ///
    /// The number is the trailing numeric segment of `resource.url`, and the
    /// image URL is `<sprite_base>/<number>.png`.
    pub fn from_resource(
        resource: &NamedResource,
        sprite_base: &str,
    ) -> Result<Self, ValidationError> {
        let name = resource.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let id = ResourceId::from_url(&resource.url)?;

        Ok(Self {
            name: capitalize(name),
            image_url: id.sprite_url(sprite_base),
            number: id.get(),
        })
    }

    /// Whether the name starts with `query`, ignoring case.
    ///
    /// `query` must already be lower-cased.
    pub fn matches_prefix(&self, query: &str) -> bool {
        self.name.to_lowercase().starts_with(query)
    }
}
