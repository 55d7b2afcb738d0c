//! Observable state of one list-browsing session.

use crate::models::PokemonListEntry;
use serde::Serialize;

/// Snapshot of the list controller's state.
///
/// Only the controller mutates it; observers receive clones through a watch
/// channel. `version` increases with every published change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadState {
    /// All entries loaded so far, in dex order
    pub items: Vec<PokemonListEntry>,

    /// View currently shown: `items`, or the subsequence matching `query`
    pub filtered_items: Vec<PokemonListEntry>,

    /// No further page will be requested
    pub end_reached: bool,

    /// A page fetch is in flight
    pub is_loading: bool,

    /// Message of the last failed page fetch
    pub load_error: Option<String>,

    /// `filtered_items` is query-filtered rather than the full list
    pub is_searching: bool,

    /// Last query passed to `set_query`, lower-cased
    pub query: String,

    /// Offset of the next page to request
    pub current_offset: usize,

    /// Total entries reported by the server, once known
    pub total_count: Option<usize>,

    pub version: u64,
}

impl LoadState {
    /// Recompute `filtered_items` from `items` and the current query.
    pub(crate) fn refilter(&mut self) {
        if self.query.is_empty() {
            self.is_searching = false;
            self.filtered_items = self.items.clone();
        } else {
            self.is_searching = true;
            self.filtered_items = filter_by_prefix(&self.items, &self.query);
        }
    }

    /// Number of rows needed to lay out `filtered_items` in `columns` columns.
    pub fn row_count(&self, columns: usize) -> usize {
        self.filtered_items.len().div_ceil(columns.max(1))
    }

    /// The error shown with a retry affordance, if any.
    pub fn retry_message(&self) -> Option<&str> {
        self.load_error.as_deref().filter(|message| !message.is_empty())
    }
}

/// Entries whose name starts with `query` (already lower-cased), in order.
pub fn filter_by_prefix(items: &[PokemonListEntry], query: &str) -> Vec<PokemonListEntry> {
    items
        .iter()
        .filter(|entry| entry.matches_prefix(query))
        .cloned()
        .collect()
}
