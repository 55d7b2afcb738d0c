//! Paginated list loading and prefix search over the loaded entries.

use super::state::LoadState;
use crate::config::Config;
use crate::models::{PokemonListEntry, PokemonPage};
use crate::palette::{self, Color};
use crate::repositories::PokemonRepository;
use std::sync::Arc;
use tokio::sync::watch;

/// What a call to [`ListController::load_next_page`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was appended.
    Loaded { added: usize },
    /// The fetch failed; `load_error` holds the message.
    Failed(String),
    /// Nothing was requested: a fetch was in flight or the end was reached.
    Skipped,
}

/// Owns one session's `LoadState` and publishes every change to subscribers.
///
/// All mutation happens through the watch sender, so `&self` methods are
/// safe to call from several tasks sharing an `Arc<ListController>`.
pub struct ListController {
    repository: Arc<dyn PokemonRepository>,
    page_size: usize,
    sprite_base_url: String,
    state: watch::Sender<LoadState>,
}

impl ListController {
    pub fn new(repository: Arc<dyn PokemonRepository>, config: &Config) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            repository,
            page_size: config.page_size.max(1),
            sprite_base_url: config.sprite_base_url.clone(),
            state,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Receive every published state.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Fetch and append the next page.
    ///
    /// No-op while a fetch is in flight or once the end was reached. A failed
    /// fetch only sets `load_error`; calling again retries the same offset.
    /// Dropping the returned future mid-fetch discards the page and leaves
    /// the controller idle, so the next call requests the same offset again.
    pub async fn load_next_page(&self) -> LoadOutcome {
        let mut offset = None;
        self.state.send_if_modified(|state| {
            if state.is_loading || state.end_reached {
                return false;
            }
            state.is_loading = true;
            state.version += 1;
            offset = Some(state.current_offset);
            true
        });

        let Some(offset) = offset else {
            tracing::trace!("Skipping page load");
            return LoadOutcome::Skipped;
        };
        let in_flight = InFlight::new(&self.state);

        tracing::debug!(offset, limit = self.page_size, "Loading page");
        let result = self
            .repository
            .get_pokemon_list(self.page_size, offset)
            .await;

        let mut outcome = LoadOutcome::Skipped;
        in_flight.finish(|state| match result {
            Ok(page) => {
                let added = self.apply_page(state, page);
                outcome = LoadOutcome::Loaded { added };
            }
            Err(e) => {
                let message = e.message();
                tracing::warn!(offset, error = %message, "Page load failed");
                state.load_error = Some(message.clone());
                outcome = LoadOutcome::Failed(message);
            }
        });

        outcome
    }

    fn apply_page(&self, state: &mut LoadState, page: PokemonPage) -> usize {
        let returned = page.results.len();
        let before = state.items.len();

        for resource in &page.results {
            match PokemonListEntry::from_resource(resource, &self.sprite_base_url) {
                Ok(entry) => state.items.push(entry),
                Err(e) => tracing::warn!(name = %resource.name, error = %e, "Skipping malformed entry"),
            }
        }

        state.current_offset += returned;
        state.total_count = Some(page.count);
        // An empty page means the server has nothing past this offset,
        // whatever count it reports.
        state.end_reached = state.items.len() >= page.count || returned == 0;
        state.load_error = None;
        state.refilter();

        tracing::info!(
            loaded = state.items.len(),
            total = page.count,
            end_reached = state.end_reached,
            "Page loaded"
        );
        state.items.len() - before
    }

    /// Filter the loaded entries by name prefix, ignoring case.
    ///
    /// Surrounding whitespace is ignored, so a blank query restores the full
    /// list like an empty one. Never touches the network or
    /// the pagination fields.
    pub fn set_query(&self, query: &str) {
        let query = query.trim().to_lowercase();
        self.state.send_if_modified(|state| {
            // Page loads refilter, so an unchanged query means an unchanged view.
            if state.query == query && state.is_searching == !query.is_empty() {
                return false;
            }
            state.query = query;
            state.refilter();
            state.version += 1;
            true
        });
    }

    /// Whether rendering row `last_visible_row` of a `columns`-wide grid
    /// should trigger the next page.
    ///
    /// True when that row is within one row of the end and the list is idle,
    /// not exhausted, and not filtered by a query.
    pub fn should_load_more(&self, last_visible_row: usize, columns: usize) -> bool {
        let state = self.state.borrow();
        let rows = state.row_count(columns);
        !state.end_reached
            && !state.is_loading
            && !state.is_searching
            && last_visible_row + 1 >= rows
    }

    /// Apply the pagination policy for a rendered row.
    pub async fn on_row_rendered(&self, row: usize, columns: usize) -> LoadOutcome {
        if self.should_load_more(row, columns) {
            self.load_next_page().await
        } else {
            LoadOutcome::Skipped
        }
    }

    /// Download the entry's sprite and extract its dominant color.
    ///
    /// Any failure yields [`Color::SURFACE`].
    pub async fn calculate_dominant_color(&self, entry: &PokemonListEntry) -> Color {
        match self.repository.get_sprite(&entry.image_url).await {
            Ok(bytes) => palette::dominant_color(bytes).await,
            Err(e) => {
                tracing::debug!(name = %entry.name, error = %e, "Using fallback color");
                Color::SURFACE
            }
        }
    }
}

/// Marks one page fetch as in flight.
///
/// `finish` applies the result and clears `is_loading` in one publish. If
/// the owning future is dropped first, `Drop` clears `is_loading` alone.
struct InFlight<'a> {
    state: &'a watch::Sender<LoadState>,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<LoadState>) -> Self {
        Self { state, done: false }
    }

    fn finish(mut self, apply: impl FnOnce(&mut LoadState)) {
        self.done = true;
        self.state.send_modify(|state| {
            apply(state);
            state.is_loading = false;
            state.version += 1;
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        tracing::debug!("Page load cancelled");
        self.state.send_modify(|state| {
            state.is_loading = false;
            state.version += 1;
        });
    }
}
