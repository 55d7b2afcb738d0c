//! Domain value objects and types.
//!
//! Type-safe wrappers validated at construction time, so list entries and
//! detail requests can never carry an empty name or an id-less URL.

pub mod errors;
pub mod pokemon_name;
pub mod resource_id;

pub use errors::ValidationError;
pub use pokemon_name::PokemonName;
pub use resource_id::ResourceId;
