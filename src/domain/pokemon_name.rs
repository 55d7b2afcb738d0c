//! PokemonName value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A lower-cased, non-empty Pokemon name as PokeAPI expects it in paths.
///
/// The upstream source is case-sensitive, so display names like
/// `"Charizard"` must be normalized before they are sent.
///
/// # Example
///
/// ```
/// use pokedex::domain::PokemonName;
///
/// let name = PokemonName::new(" Charizard ").unwrap();
/// assert_eq!(name.as_str(), "charizard");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonName(String);

impl PokemonName {
    /// Create a new PokemonName, trimming and lower-casing the input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if nothing is left after trimming.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = name.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(normalized))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: first letter upper-cased, the rest untouched.
    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }
}

/// Upper-case the first character of `value`.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Serialize for PokemonName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PokemonName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PokemonName::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PokemonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
