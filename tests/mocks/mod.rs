//! Mock repository implementations for testing.

pub mod mock_pokemon_repository;

#[allow(unused_imports)]
pub use mock_pokemon_repository::MockPokemonRepository;
