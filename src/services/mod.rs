//! Services module - Pure organizing logic, free of engine state.
//!
//! Each stage of the organize pass lives here as plain functions over
//! entity snapshots, which keeps them independently testable and reusable:
//!
//! - [`filter`]: reduce the mod list to the subset matching the active
//!   [`FilterType`](crate::models::FilterType)
//! - [`sort`]: one generic stable merge sort plus the per-entity comparator
//!   tables for every [`SortType`](crate::models::SortType)
//! - [`aggregate`]: per-game-version supported/compatible mod counts,
//!   cached in [`aggregate::GameVersionCounts`]
//! - [`authors`]: team and individual-author rosters derived from mod
//!   credit metadata
//! - [`validity`]: the total validity matrix over sort/filter/selection
//!   combinations
//!
//! None of these functions touch the upstream collections or the broadcast
//! channel; the [`state`](crate::state) layer snapshots inputs, calls
//! through here and emits the resulting change events.

pub mod aggregate;
pub mod authors;
pub mod filter;
pub mod sort;
pub mod validity;

pub use aggregate::{GameVersionCounts, ModCounts};
pub use filter::{FilterContext, filter_mods, mod_passes_filter};
pub use sort::merge_sort_by;
pub use validity::{BrowseContext, browse_context, is_valid_sort_type, valid_sort_types};
