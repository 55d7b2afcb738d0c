mod pokeapi_repository;
mod traits;

pub use pokeapi_repository::PokeApiPokemonRepository;
pub use traits::PokemonRepository;
