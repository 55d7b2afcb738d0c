//! Values handed from the list to a detail view.

use crate::domain::{PokemonName, ValidationError};
use crate::palette::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Route prefix of the detail screen.
pub const DETAIL_SCREEN: &str = "pokemon_detail_screen";

/// The entry name and its extracted color, packed as ARGB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRoute {
    pub pokemon_name: String,
    pub dominant_color: u32,
}

/// Why a route path could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    WrongScreen(String),
    MissingSegment(&'static str),
    InvalidColor(String),
    InvalidName(ValidationError),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongScreen(screen) => write!(f, "Not a detail route: {}", screen),
            Self::MissingSegment(segment) => write!(f, "Route is missing the {} segment", segment),
            Self::InvalidColor(color) => write!(f, "Invalid color segment: {}", color),
            Self::InvalidName(e) => write!(f, "Invalid name segment: {}", e),
        }
    }
}

impl std::error::Error for RouteError {}

impl DetailRoute {
    pub fn new(pokemon_name: impl Into<String>, color: Color) -> Self {
        Self {
            pokemon_name: pokemon_name.into(),
            dominant_color: color.to_argb(),
        }
    }

    pub fn color(&self) -> Color {
        Color::from_argb(self.dominant_color)
    }

    /// Name in the form the detail fetch expects.
    pub fn lookup_name(&self) -> Result<PokemonName, ValidationError> {
        PokemonName::new(&self.pokemon_name)
    }

    /// `pokemon_detail_screen/{color}/{name}`
    pub fn to_path(&self) -> String {
        format!(
            "{}/{}/{}",
            DETAIL_SCREEN,
            self.dominant_color,
            urlencoding::encode(&self.pokemon_name)
        )
    }

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let mut segments = path.trim_matches('/').splitn(3, '/');

        let screen = segments.next().unwrap_or_default();
        if screen != DETAIL_SCREEN {
            return Err(RouteError::WrongScreen(screen.to_string()));
        }

        let color = segments
            .next()
            .ok_or(RouteError::MissingSegment("color"))?;
        let dominant_color = color
            .parse::<u32>()
            .map_err(|_| RouteError::InvalidColor(color.to_string()))?;

        let name = segments.next().ok_or(RouteError::MissingSegment("name"))?;
        let pokemon_name = urlencoding::decode(name)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| name.to_string());
        if pokemon_name.trim().is_empty() {
            return Err(RouteError::InvalidName(ValidationError::EmptyName));
        }

        Ok(Self {
            pokemon_name,
            dominant_color,
        })
    }
}
