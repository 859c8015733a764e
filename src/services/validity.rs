//! The validity matrix.
//!
//! A pure, total decision function over every `(SortType, FilterType,
//! selection flags)` combination. The engine consults it before committing
//! any filter or sort change and after any selection change; it is the
//! single place where the legality rules live, replacing scattered
//! conditionals.

use crate::models::options::{FilterType, SortType};

/// Which kind of entity the organized view is currently browsing.
///
/// Derived from the active filter and the selection flags. The two
/// game-version filters browse the game-version list until one is selected;
/// the team and author filters browse the roster until one is selected.
/// Every other combination browses mods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowseContext {
    Mods,
    GameVersions,
    Teams,
    Authors,
}

/// Derives the browsing context from the filter and the selection flags.
pub fn browse_context(
    filter_type: FilterType,
    has_selected_game_version: bool,
    has_selected_team: bool,
    has_selected_author: bool,
) -> BrowseContext {
    match filter_type {
        FilterType::Teams if !has_selected_team => BrowseContext::Teams,
        FilterType::Authors if !has_selected_author => BrowseContext::Authors,
        FilterType::SupportedGameVersions | FilterType::CompatibleGameVersions
            if !has_selected_game_version =>
        {
            BrowseContext::GameVersions
        }
        _ => BrowseContext::Mods,
    }
}

/// Whether the sort type is legal in the given browsing context.
///
/// The match is deliberately exhaustive on both enums so adding a sort type
/// or a context forces this function to be reconciled.
pub fn sort_type_valid_in_context(sort_type: SortType, context: BrowseContext) -> bool {
    match context {
        BrowseContext::Mods => match sort_type {
            SortType::Unsorted
            | SortType::Name
            | SortType::InitialReleaseDate
            | SortType::LatestReleaseDate
            | SortType::NumberOfVersions
            | SortType::Random => true,
            SortType::NumberOfMods
            | SortType::NumberOfSupportedMods
            | SortType::NumberOfCompatibleMods => false,
        },
        BrowseContext::GameVersions => match sort_type {
            SortType::Unsorted
            | SortType::Name
            | SortType::NumberOfSupportedMods
            | SortType::NumberOfCompatibleMods
            | SortType::Random => true,
            SortType::InitialReleaseDate
            | SortType::LatestReleaseDate
            | SortType::NumberOfMods
            | SortType::NumberOfVersions => false,
        },
        BrowseContext::Teams | BrowseContext::Authors => match sort_type {
            SortType::Unsorted | SortType::Name | SortType::NumberOfMods | SortType::Random => true,
            SortType::InitialReleaseDate
            | SortType::LatestReleaseDate
            | SortType::NumberOfVersions
            | SortType::NumberOfSupportedMods
            | SortType::NumberOfCompatibleMods => false,
        },
    }
}

/// The full matrix: is `(sort, filter, selections)` a legal engine state?
pub fn is_valid_sort_type(
    sort_type: SortType,
    filter_type: FilterType,
    has_selected_game_version: bool,
    has_selected_team: bool,
    has_selected_author: bool,
) -> bool {
    let context = browse_context(
        filter_type,
        has_selected_game_version,
        has_selected_team,
        has_selected_author,
    );
    sort_type_valid_in_context(sort_type, context)
}

/// Sort types legal in the given context, in declaration order.
///
/// The first entry is the deterministic fallback used when a selection
/// change invalidates the current sort type; UI sort pickers are populated
/// from this list.
pub fn valid_sort_types(
    filter_type: FilterType,
    has_selected_game_version: bool,
    has_selected_team: bool,
    has_selected_author: bool,
) -> Vec<SortType> {
    let context = browse_context(
        filter_type,
        has_selected_game_version,
        has_selected_team,
        has_selected_author,
    );
    SortType::ALL
        .iter()
        .copied()
        .filter(|sort_type| sort_type_valid_in_context(*sort_type, context))
        .collect()
}
