//! ResourceId value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Last purely numeric path segment, optionally followed by a trailing slash.
static TRAILING_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d+)/?$").expect("valid resource id regex"));

/// Numeric id of a PokeAPI resource, as embedded in its detail URL.
///
/// # Example
///
/// ```
/// use pokedex::domain::ResourceId;
///
/// let id = ResourceId::from_url("https://pokeapi.co/api/v2/pokemon/35/").unwrap();
/// assert_eq!(id.get(), 35);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Parse the trailing numeric segment of `url`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingResourceId` when the last segment is
    /// not a number (or does not fit in a `u32`).
    pub fn from_url(url: &str) -> Result<Self, ValidationError> {
        TRAILING_ID
            .captures(url.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(Self)
            .ok_or_else(|| ValidationError::MissingResourceId(url.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Sprite image URL for this id under `sprite_base`.
    pub fn sprite_url(self, sprite_base: &str) -> String {
        format!("{}/{}.png", sprite_base.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
