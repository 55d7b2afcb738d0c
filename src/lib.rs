//! Pokedex - data core for browsing PokeAPI.
//!
//! Lists Pokemon page by page, filters the loaded list by name prefix, fetches
//! detail records, and extracts a representative color from sprite images.
//! Rendering is left to the caller, which observes `LoadState` through a
//! watch channel.
//!
//! # Architecture
//!
//! - **client**: synchronous PokeAPI client and its async wrapper
//! - **repositories**: fault-normalizing repository over the client
//! - **controller**: list and detail controllers owning UI-facing state
//! - **palette**: dominant color extraction
//! - **models** / **domain**: payload records and validated value objects
//! - **navigation**: the route values passed to a detail view
//! - **config** / **error** / **metrics**: ambient plumbing

pub mod client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod navigation;
pub mod palette;
pub mod repositories;

pub use client::PokeApiClient;
pub use config::Config;
pub use controller::{DetailController, ListController, LoadOutcome, LoadState};
pub use error::{ConfigError, PokeApiError, RepositoryError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{PokemonDetail, PokemonListEntry, PokemonPage};
pub use navigation::DetailRoute;
pub use palette::Color;
