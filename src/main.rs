//! Pokedex - command line entry point
//!
//! Wires client, repository and controllers explicitly, then loads pages,
//! applies an optional search query and prints what a list screen would show.

use anyhow::Result;
use clap::Parser;
use futures::future::join_all;
use pokedex::client::{AsyncPokeApiClient, AsyncPokeApiClientImpl};
use pokedex::repositories::{PokeApiPokemonRepository, PokemonRepository};
use pokedex::{
    Config, DetailController, DetailRoute, ListController, LoadOutcome, PokeApiClient,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse PokeAPI page by page")]
struct Args {
    /// Number of pages to load
    #[arg(short, long, default_value_t = 1)]
    pages: usize,

    /// Only show entries whose name starts with this prefix
    #[arg(short, long)]
    query: Option<String>,

    /// Extract the dominant sprite color of each shown entry
    #[arg(long)]
    colors: bool,

    /// Print the detail record of this Pokemon
    #[arg(short, long)]
    detail: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // stderr only, so stdout stays clean for the listing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Using PokeAPI at {}", config.api_base_url);

    let sync_client = PokeApiClient::new(&config);
    let async_client = AsyncPokeApiClientImpl::new(sync_client);
    let metrics = async_client.metrics().clone();
    let client = Arc::new(async_client) as Arc<dyn AsyncPokeApiClient>;
    let repository = Arc::new(PokeApiPokemonRepository::new(client)) as Arc<dyn PokemonRepository>;

    let list = ListController::new(repository.clone(), &config);
    let details = DetailController::new(repository);

    for _ in 0..args.pages {
        match list.load_next_page().await {
            LoadOutcome::Loaded { added } => info!("Loaded {} entries", added),
            LoadOutcome::Failed(message) => {
                error!("Page load failed: {}", message);
                break;
            }
            LoadOutcome::Skipped => break,
        }
    }

    if let Some(query) = &args.query {
        list.set_query(query);
    }

    let state = list.state();
    let shown = &state.filtered_items;
    let colors = if args.colors {
        join_all(shown.iter().map(|entry| list.calculate_dominant_color(entry))).await
    } else {
        Vec::new()
    };

    for (index, entry) in shown.iter().enumerate() {
        match colors.get(index) {
            Some(color) => {
                let route = DetailRoute::new(entry.name.clone(), *color);
                println!("#{:<5} {:<20} {}  {}", entry.number, entry.name, color, route.to_path());
            }
            None => println!("#{:<5} {:<20} {}", entry.number, entry.name, entry.image_url),
        }
    }

    if let Some(message) = state.retry_message() {
        println!("{} (run again to retry)", message);
    }
    println!(
        "{} of {} shown, {} loaded{}",
        shown.len(),
        state.total_count.unwrap_or(0),
        state.items.len(),
        if state.end_reached { ", end reached" } else { "" }
    );

    if let Some(name) = &args.detail {
        match details.get_pokemon_info(name).await {
            Ok(detail) => {
                println!(
                    "#{} {} [{}] {:.1} m, {:.1} kg",
                    detail.id,
                    detail.name,
                    detail.type_names().join("/"),
                    detail.height_m(),
                    detail.weight_kg()
                );
                for stat in &detail.stats {
                    println!("  {:<16} {}", stat.stat.name, stat.base_stat);
                }
            }
            Err(e) => println!("Detail lookup failed: {}", e),
        }
    }

    let summary = metrics.summary();
    info!(
        "{} requests, {} errors, avg {:.1} ms",
        summary.http_requests_total, summary.http_errors_total, summary.http_duration_avg_ms
    );

    Ok(())
}
