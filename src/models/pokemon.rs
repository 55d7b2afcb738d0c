//! Pokemon detail record as returned by `GET /pokemon/{name}`.
//!
//! Only the fields the core uses are modeled. Required fields have no serde
//! default, so a payload missing them fails to parse instead of producing
//! half-empty records.

use serde::{Deserialize, Serialize};

/// A `{name, url}` pair, the basic link type of PokeAPI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Full detail record for one Pokemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PokemonDetail {
    /// National dex number
    pub id: u32,

    /// Lower-case API name
    pub name: String,

    /// Height in decimetres
    pub height: u32,

    /// Weight in hectograms
    pub weight: u32,

    /// Experience gained for defeating this Pokemon (absent for some forms)
    #[serde(default)]
    pub base_experience: Option<u32>,

    pub types: Vec<PokemonTypeSlot>,

    pub stats: Vec<PokemonStat>,

    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,

    pub sprites: PokemonSprites,
}

/// One of a Pokemon's types, ordered by slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonTypeSlot {
    pub slot: u8,

    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

/// A base stat value (hp, attack, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonStat {
    pub base_stat: u32,

    #[serde(default)]
    pub effort: u32,

    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonAbility {
    pub ability: NamedResource,

    #[serde(default)]
    pub is_hidden: bool,

    #[serde(default)]
    pub slot: u8,
}

/// Sprite URLs. Every entry may be null upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_default: Option<String>,

    /// Nested sprite sets (`official-artwork`, `home`, ...), kept verbatim
    pub other: Option<serde_json::Value>,
}

impl PokemonSprites {
    /// Official artwork URL, if present.
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .as_ref()?
            .pointer("/official-artwork/front_default")?
            .as_str()
    }
}

impl PokemonDetail {
    /// Type names in slot order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&PokemonTypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.iter().map(|slot| slot.type_info.name.as_str()).collect()
    }

    /// Base value of the stat called `name` (e.g. `"hp"`).
    pub fn base_stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|stat| stat.stat.name == name)
            .map(|stat| stat.base_stat)
    }

    /// Height in metres.
    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }
}
