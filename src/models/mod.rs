//! Data models for PokeAPI payloads and the entries derived from them.
//!
//! Raw page payloads are transient: the list controller turns them into
//! `PokemonListEntry` values and drops them.

pub mod pokemon;
pub mod pokemon_list;

pub use pokemon::{
    NamedResource, PokemonAbility, PokemonDetail, PokemonSprites, PokemonStat, PokemonTypeSlot,
};
pub use pokemon_list::{PokemonListEntry, PokemonPage};
