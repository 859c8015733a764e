//! The filter stage.
//!
//! Reduces the full mod list to the subset matching the active filter.
//! Filters that need a selection (a game version, a team, an author) yield
//! an empty result until one is chosen; the validity matrix guarantees the
//! engine is browsing the corresponding entity list in the meantime, so an
//! empty mod list is the correct, non-error answer.

use crate::models::entities::{AuthorInfo, FavouriteModIdentifier, GameMod, GameVersion};
use crate::models::options::FilterType;
use std::sync::Arc;

/// Everything the filter predicates may consult besides the mod itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterContext<'a> {
    pub favourites: &'a [Arc<FavouriteModIdentifier>],
    pub selected_game_version: Option<&'a GameVersion>,
    pub selected_team: Option<&'a AuthorInfo>,
    pub selected_author: Option<&'a AuthorInfo>,
}

/// Applies the active filter, preserving the source order of survivors.
pub fn filter_mods(
    mods: &[Arc<GameMod>],
    filter_type: FilterType,
    context: FilterContext<'_>,
) -> Vec<Arc<GameMod>> {
    mods.iter()
        .filter(|game_mod| mod_passes_filter(game_mod, filter_type, context))
        .cloned()
        .collect()
}

/// The filter predicate for a single mod.
pub fn mod_passes_filter(game_mod: &GameMod, filter_type: FilterType, context: FilterContext<'_>) -> bool {
    match filter_type {
        FilterType::None => true,
        FilterType::Favourites => context
            .favourites
            .iter()
            .any(|favourite| game_mod.matches_favourite(favourite)),
        FilterType::Downloaded => game_mod.is_downloaded(),
        FilterType::SupportedGameVersions => context
            .selected_game_version
            .is_some_and(|game_version| game_mod.supports_game_version(&game_version.id)),
        FilterType::CompatibleGameVersions => context
            .selected_game_version
            .is_some_and(|game_version| game_version.is_compatible_with_mod(game_mod)),
        FilterType::StandAlone => game_mod.is_stand_alone(),
        FilterType::Teams => context
            .selected_team
            .is_some_and(|team| game_mod.has_team(&team.name)),
        FilterType::Authors => context
            .selected_author
            .is_some_and(|author| game_mod.has_author(&author.name)),
    }
}
