//! Controllers owning the state a UI observes.
//!
//! - **ListController**: paginated loading, prefix search, pagination policy
//! - **DetailController**: detail lookups for selected entries

mod detail_controller;
mod list_controller;
mod state;

pub use detail_controller::DetailController;
pub use list_controller::{ListController, LoadOutcome};
pub use state::{filter_by_prefix, LoadState};
