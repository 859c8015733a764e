// Organizer state module
//
// This module provides the OrganizerManager which owns the derived view
// state behind Arc<RwLock<T>>, consumes typed upstream change notifications
// and emits its own change events for GUI updates.

pub mod selection;

use crate::metrics::Metrics;
use crate::models::collections::{FavouriteModCollection, GameVersionCollection, ModCollection};
use crate::models::entities::{AuthorInfo, FavouriteModIdentifier, GameMod, GameVersion};
use crate::models::options::{FilterType, SortDirection, SortType};
use crate::models::settings::OrganizerSettings;
use crate::services::aggregate::GameVersionCounts;
use crate::services::filter::FilterContext;
use crate::services::validity::BrowseContext;
use crate::services::{authors, filter, sort, validity};
use rand::Rng;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

pub use selection::{OrganizedLists, RepairReport, Selections, repair_selections};

/// Typed notification of an upstream collection mutation.
///
/// The collections themselves are passive stores; their owner mutates them
/// and then hands one of these to [`OrganizerManager::notify`]. This
/// replaces implicit signal/slot wiring with an explicit message, so the
/// re-organize always happens on the caller's thread before `notify`
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    /// The mod collection changed structurally.
    ModsUpdated,

    /// The favourite-mod collection changed.
    FavouritesUpdated,

    /// Game versions were added or removed.
    GameVersionsSizeChanged,

    /// A single game version was edited in place (its compatibility list
    /// may have changed, so aggregates are recomputed too).
    GameVersionModified(String),
}

/// Change events emitted after each engine mutation.
///
/// Every event carries the new immutable snapshot, so observers never need
/// to reach back into the engine from the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum OrganizerChange {
    FilterTypeChanged(FilterType),
    SortOptionsChanged {
        sort_type: SortType,
        sort_direction: SortDirection,
    },
    SelectedModChanged(Option<Arc<GameMod>>),
    SelectedFavouriteModChanged(Option<Arc<FavouriteModIdentifier>>),
    SelectedGameVersionChanged(Option<Arc<GameVersion>>),
    SelectedTeamChanged(Option<Arc<AuthorInfo>>),
    SelectedAuthorChanged(Option<Arc<AuthorInfo>>),
    OrganizedModsChanged(Vec<Arc<GameMod>>),
    OrganizedFavouriteModsChanged(Vec<Arc<FavouriteModIdentifier>>),
    OrganizedGameVersionsChanged(Vec<Arc<GameVersion>>),
    OrganizedTeamsChanged(Vec<Arc<AuthorInfo>>),
    OrganizedAuthorsChanged(Vec<Arc<AuthorInfo>>),
}

/// Everything the organizer derives: view options, organized projections,
/// selections, the aggregate cache and the author rosters.
#[derive(Debug, Clone, Default)]
struct OrganizerState {
    filter_type: FilterType,
    sort_type: SortType,
    sort_direction: SortDirection,
    organized: OrganizedLists,
    selections: Selections,
    counts: GameVersionCounts,
    team_roster: Vec<Arc<AuthorInfo>>,
    author_roster: Vec<Arc<AuthorInfo>>,
}

/// The organizing engine.
///
/// Holds shared read access to up to three upstream collections (each
/// optional; absence degrades gracefully to empty views), derives the five
/// organized lists from them, tracks one selection per category, and
/// broadcasts [`OrganizerChange`] events after every mutation.
///
/// All operations are synchronous and complete on the caller's thread; the
/// engine never mutates the upstream collections.
pub struct OrganizerManager {
    mods: Option<Arc<RwLock<ModCollection>>>,
    favourites: Option<Arc<RwLock<FavouriteModCollection>>>,
    game_versions: Option<Arc<RwLock<GameVersionCollection>>>,

    /// Derived state protected by RwLock for cheap snapshot reads
    state: Arc<RwLock<OrganizerState>>,

    /// Broadcast channel for emitting change events
    change_tx: broadcast::Sender<OrganizerChange>,

    metrics: Arc<Metrics>,
}

impl OrganizerManager {
    /// Creates an engine with no collections wired; every view is empty.
    pub fn new() -> Self {
        Self::with_collections(None, None, None)
    }

    /// Creates an engine wired to the given upstream collections and runs
    /// the initial organize pass.
    pub fn with_collections(
        mods: Option<Arc<RwLock<ModCollection>>>,
        favourites: Option<Arc<RwLock<FavouriteModCollection>>>,
        game_versions: Option<Arc<RwLock<GameVersionCollection>>>,
    ) -> Self {
        let (change_tx, _) = broadcast::channel(100);
        let manager = Self {
            mods,
            favourites,
            game_versions,
            state: Arc::new(RwLock::new(OrganizerState::default())),
            change_tx,
            metrics: Arc::new(Metrics::new()),
        };

        {
            let mut state = manager.state.write().unwrap();
            manager.refresh_derived(&mut state);
            // Nobody can be subscribed yet; the initial events are dropped.
            let changes = manager.reorganize(&mut state);
            manager.emit_all(changes);
        }

        manager
    }

    /// Wires (or replaces) the mod collection and re-organizes.
    pub fn wire_mod_collection(&mut self, collection: Arc<RwLock<ModCollection>>) {
        self.mods = Some(collection);
        self.notify(CollectionChange::ModsUpdated);
    }

    /// Wires (or replaces) the favourite-mod collection and re-organizes.
    pub fn wire_favourite_mod_collection(&mut self, collection: Arc<RwLock<FavouriteModCollection>>) {
        self.favourites = Some(collection);
        self.notify(CollectionChange::FavouritesUpdated);
    }

    /// Wires (or replaces) the game-version collection and re-organizes.
    pub fn wire_game_version_collection(&mut self, collection: Arc<RwLock<GameVersionCollection>>) {
        self.game_versions = Some(collection);
        self.notify(CollectionChange::GameVersionsSizeChanged);
    }

    /// Subscribe to engine change events.
    ///
    /// Returns a receiver that will get all future events. Multiple
    /// subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<OrganizerChange> {
        self.change_tx.subscribe()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    // ------------------------------------------------------------------
    // Upstream change handling

    /// Handles an upstream collection change synchronously: recomputes the
    /// affected derived data, re-runs the full organize pass and emits the
    /// resulting events before returning.
    pub fn notify(&self, change: CollectionChange) {
        tracing::debug!(?change, "upstream collection change");
        let mut state = self.state.write().unwrap();

        match &change {
            CollectionChange::ModsUpdated => self.refresh_derived(&mut state),
            CollectionChange::FavouritesUpdated => {}
            CollectionChange::GameVersionsSizeChanged | CollectionChange::GameVersionModified(_) => {
                state.counts =
                    GameVersionCounts::compute(&self.mods_snapshot(), &self.game_versions_snapshot());
            }
        }

        let changes = self.reorganize(&mut state);
        self.emit_all(changes);
    }

    /// Re-runs the organize pass without any upstream change. Idempotent
    /// for every sort type except Random.
    pub fn organize(&self) {
        let mut state = self.state.write().unwrap();
        let changes = self.reorganize(&mut state);
        self.emit_all(changes);
    }

    // ------------------------------------------------------------------
    // View options

    pub fn filter_type(&self) -> FilterType {
        self.state.read().unwrap().filter_type
    }

    pub fn sort_type(&self) -> SortType {
        self.state.read().unwrap().sort_type
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.state.read().unwrap().sort_direction
    }

    /// The current browsing context implied by the filter and selections.
    pub fn browse_context(&self) -> BrowseContext {
        let state = self.state.read().unwrap();
        validity::browse_context(
            state.filter_type,
            state.selections.has_selected_game_version(),
            state.selections.has_selected_team(),
            state.selections.has_selected_author(),
        )
    }

    /// Sort types legal right now, in declaration order. UI sort pickers
    /// are populated from this list; its first entry is the fallback used
    /// when a selection change invalidates the active sort.
    pub fn valid_sort_types(&self) -> Vec<SortType> {
        let state = self.state.read().unwrap();
        validity::valid_sort_types(
            state.filter_type,
            state.selections.has_selected_game_version(),
            state.selections.has_selected_team(),
            state.selections.has_selected_author(),
        )
    }

    /// Sets the active filter.
    ///
    /// Rejected (returns false, no state change, no events) when the
    /// current sort type would be invalid under the new filter; callers
    /// switch the sort first.
    pub fn set_filter_type(&self, filter_type: FilterType) -> bool {
        let mut state = self.state.write().unwrap();
        if state.filter_type == filter_type {
            return true;
        }

        if !validity::is_valid_sort_type(
            state.sort_type,
            filter_type,
            state.selections.has_selected_game_version(),
            state.selections.has_selected_team(),
            state.selections.has_selected_author(),
        ) {
            tracing::warn!(
                filter_type = %filter_type,
                sort_type = %state.sort_type,
                "rejected filter change: combination fails the validity matrix"
            );
            self.metrics.record_rejected_request();
            return false;
        }

        state.filter_type = filter_type;
        let mut changes = vec![OrganizerChange::FilterTypeChanged(filter_type)];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    /// Sets the active sort type, rejecting combinations the validity
    /// matrix forbids in the current context.
    pub fn set_sort_type(&self, sort_type: SortType) -> bool {
        let direction = self.state.read().unwrap().sort_direction;
        self.set_sort_options(sort_type, direction)
    }

    /// Sets the sort direction. Always legal; a no-op when unchanged.
    pub fn set_sort_direction(&self, sort_direction: SortDirection) -> bool {
        let sort_type = self.state.read().unwrap().sort_type;
        self.set_sort_options(sort_type, sort_direction)
    }

    /// Sets sort type and direction together, emitting a single
    /// `SortOptionsChanged` event on success.
    pub fn set_sort_options(&self, sort_type: SortType, sort_direction: SortDirection) -> bool {
        let mut state = self.state.write().unwrap();
        if state.sort_type == sort_type && state.sort_direction == sort_direction {
            return true;
        }

        if !validity::is_valid_sort_type(
            sort_type,
            state.filter_type,
            state.selections.has_selected_game_version(),
            state.selections.has_selected_team(),
            state.selections.has_selected_author(),
        ) {
            tracing::warn!(
                sort_type = %sort_type,
                filter_type = %state.filter_type,
                "rejected sort change: combination fails the validity matrix"
            );
            self.metrics.record_rejected_request();
            return false;
        }

        state.sort_type = sort_type;
        state.sort_direction = sort_direction;
        let mut changes = vec![OrganizerChange::SortOptionsChanged {
            sort_type,
            sort_direction,
        }];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    /// Current view options as persistable settings.
    pub fn settings(&self) -> OrganizerSettings {
        let state = self.state.read().unwrap();
        OrganizerSettings {
            filter_type: state.filter_type,
            sort_type: state.sort_type,
            sort_direction: state.sort_direction,
        }
    }

    /// Applies persisted settings in one transition.
    ///
    /// Rejected as a whole when the combination fails the validity matrix
    /// under the current selections; on success the filter and sort events
    /// fire only for the options that actually changed.
    pub fn apply_settings(&self, settings: &OrganizerSettings) -> bool {
        let mut state = self.state.write().unwrap();
        if !validity::is_valid_sort_type(
            settings.sort_type,
            settings.filter_type,
            state.selections.has_selected_game_version(),
            state.selections.has_selected_team(),
            state.selections.has_selected_author(),
        ) {
            tracing::warn!(
                sort_type = %settings.sort_type,
                filter_type = %settings.filter_type,
                "rejected settings: combination fails the validity matrix"
            );
            self.metrics.record_rejected_request();
            return false;
        }

        let mut changes = Vec::new();
        if state.filter_type != settings.filter_type {
            state.filter_type = settings.filter_type;
            changes.push(OrganizerChange::FilterTypeChanged(settings.filter_type));
        }
        if state.sort_type != settings.sort_type || state.sort_direction != settings.sort_direction {
            state.sort_type = settings.sort_type;
            state.sort_direction = settings.sort_direction;
            changes.push(OrganizerChange::SortOptionsChanged {
                sort_type: settings.sort_type,
                sort_direction: settings.sort_direction,
            });
        }
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    // ------------------------------------------------------------------
    // Organized list snapshots

    pub fn organized_mods(&self) -> Vec<Arc<GameMod>> {
        self.state.read().unwrap().organized.mods.clone()
    }

    pub fn organized_favourite_mods(&self) -> Vec<Arc<FavouriteModIdentifier>> {
        self.state.read().unwrap().organized.favourites.clone()
    }

    pub fn organized_game_versions(&self) -> Vec<Arc<GameVersion>> {
        self.state.read().unwrap().organized.game_versions.clone()
    }

    pub fn organized_teams(&self) -> Vec<Arc<AuthorInfo>> {
        self.state.read().unwrap().organized.teams.clone()
    }

    pub fn organized_authors(&self) -> Vec<Arc<AuthorInfo>> {
        self.state.read().unwrap().organized.authors.clone()
    }

    // ------------------------------------------------------------------
    // Aggregate reads

    /// Mods declaring the game version as supported, from the cache.
    pub fn supported_mod_count(&self, game_version_id: &str) -> usize {
        self.state.read().unwrap().counts.supported_mod_count(game_version_id)
    }

    /// Mods compatible with the game version, from the cache.
    pub fn compatible_mod_count(&self, game_version_id: &str) -> usize {
        self.state.read().unwrap().counts.compatible_mod_count(game_version_id)
    }

    // ------------------------------------------------------------------
    // Selection: mods

    pub fn selected_mod(&self) -> Option<Arc<GameMod>> {
        self.state.read().unwrap().selections.game_mod.clone()
    }

    /// Selects the mod at `index` in the organized mod list. Out-of-bounds
    /// indices are rejected without any state change.
    pub fn select_mod(&self, index: usize) -> bool {
        let mut state = self.state.write().unwrap();
        let Some(game_mod) = state.organized.mods.get(index).cloned() else {
            self.reject_index(index, state.organized.mods.len(), "mod");
            return false;
        };
        if state.selections.game_mod.as_ref().is_some_and(|m| m.id == game_mod.id) {
            return true;
        }
        state.selections.game_mod = Some(game_mod.clone());
        self.emit_all(vec![OrganizerChange::SelectedModChanged(Some(game_mod))]);
        true
    }

    /// Selects the mod with the given id, if present in the organized list.
    pub fn select_mod_with_id(&self, id: &str) -> bool {
        let position = {
            let state = self.state.read().unwrap();
            state.organized.mods.iter().position(|m| m.id == id)
        };
        match position {
            Some(index) => self.select_mod(index),
            None => {
                self.metrics.record_rejected_request();
                false
            }
        }
    }

    pub fn select_random_mod(&self) -> bool {
        let len = self.state.read().unwrap().organized.mods.len();
        match self.random_index(len) {
            Some(index) => self.select_mod(index),
            None => false,
        }
    }

    pub fn clear_selected_mod(&self) -> bool {
        let mut state = self.state.write().unwrap();
        if state.selections.game_mod.take().is_some() {
            self.emit_all(vec![OrganizerChange::SelectedModChanged(None)]);
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Selection: favourite mods

    pub fn selected_favourite_mod(&self) -> Option<Arc<FavouriteModIdentifier>> {
        self.state.read().unwrap().selections.favourite.clone()
    }

    pub fn select_favourite_mod(&self, index: usize) -> bool {
        let mut state = self.state.write().unwrap();
        let Some(favourite) = state.organized.favourites.get(index).cloned() else {
            self.reject_index(index, state.organized.favourites.len(), "favourite");
            return false;
        };
        if state.selections.favourite.as_deref() == Some(favourite.as_ref()) {
            return true;
        }
        state.selections.favourite = Some(favourite.clone());
        self.emit_all(vec![OrganizerChange::SelectedFavouriteModChanged(Some(favourite))]);
        true
    }

    /// Selects the first favourite pinned under the given mod name.
    pub fn select_favourite_mod_with_name(&self, name: &str) -> bool {
        let position = {
            let state = self.state.read().unwrap();
            state
                .organized
                .favourites
                .iter()
                .position(|f| f.name.eq_ignore_ascii_case(name))
        };
        match position {
            Some(index) => self.select_favourite_mod(index),
            None => {
                self.metrics.record_rejected_request();
                false
            }
        }
    }

    pub fn select_random_favourite_mod(&self) -> bool {
        let len = self.state.read().unwrap().organized.favourites.len();
        match self.random_index(len) {
            Some(index) => self.select_favourite_mod(index),
            None => false,
        }
    }

    pub fn clear_selected_favourite_mod(&self) -> bool {
        let mut state = self.state.write().unwrap();
        if state.selections.favourite.take().is_some() {
            self.emit_all(vec![OrganizerChange::SelectedFavouriteModChanged(None)]);
            true
        } else {
            false
        }
    }

    // ------------------------------------------------------------------
    // Selection: game versions
    //
    // Selecting or clearing a game version, team or author changes the
    // browsing context: the mod filter result changes and the active sort
    // type may become invalid, so these paths re-organize (which also
    // applies the deterministic sort fallback when needed).

    pub fn selected_game_version(&self) -> Option<Arc<GameVersion>> {
        self.state.read().unwrap().selections.game_version.clone()
    }

    pub fn select_game_version(&self, index: usize) -> bool {
        let mut state = self.state.write().unwrap();
        let Some(game_version) = state.organized.game_versions.get(index).cloned() else {
            self.reject_index(index, state.organized.game_versions.len(), "game version");
            return false;
        };
        if state
            .selections
            .game_version
            .as_ref()
            .is_some_and(|g| g.id == game_version.id)
        {
            return true;
        }
        state.selections.game_version = Some(game_version.clone());
        let mut changes = vec![OrganizerChange::SelectedGameVersionChanged(Some(game_version))];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    pub fn select_game_version_with_id(&self, id: &str) -> bool {
        let position = {
            let state = self.state.read().unwrap();
            state.organized.game_versions.iter().position(|g| g.id == id)
        };
        match position {
            Some(index) => self.select_game_version(index),
            None => {
                self.metrics.record_rejected_request();
                false
            }
        }
    }

    pub fn select_random_game_version(&self) -> bool {
        let len = self.state.read().unwrap().organized.game_versions.len();
        match self.random_index(len) {
            Some(index) => self.select_game_version(index),
            None => false,
        }
    }

    pub fn clear_selected_game_version(&self) -> bool {
        let mut state = self.state.write().unwrap();
        if state.selections.game_version.take().is_none() {
            return false;
        }
        let mut changes = vec![OrganizerChange::SelectedGameVersionChanged(None)];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    // ------------------------------------------------------------------
    // Selection: teams

    pub fn selected_team(&self) -> Option<Arc<AuthorInfo>> {
        self.state.read().unwrap().selections.team.clone()
    }

    pub fn select_team(&self, index: usize) -> bool {
        let mut state = self.state.write().unwrap();
        let Some(team) = state.organized.teams.get(index).cloned() else {
            self.reject_index(index, state.organized.teams.len(), "team");
            return false;
        };
        if state
            .selections
            .team
            .as_ref()
            .is_some_and(|t| t.name.eq_ignore_ascii_case(&team.name))
        {
            return true;
        }
        state.selections.team = Some(team.clone());
        let mut changes = vec![OrganizerChange::SelectedTeamChanged(Some(team))];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    pub fn select_team_with_name(&self, name: &str) -> bool {
        let position = {
            let state = self.state.read().unwrap();
            state
                .organized
                .teams
                .iter()
                .position(|t| t.name.eq_ignore_ascii_case(name))
        };
        match position {
            Some(index) => self.select_team(index),
            None => {
                self.metrics.record_rejected_request();
                false
            }
        }
    }

    pub fn select_random_team(&self) -> bool {
        let len = self.state.read().unwrap().organized.teams.len();
        match self.random_index(len) {
            Some(index) => self.select_team(index),
            None => false,
        }
    }

    pub fn clear_selected_team(&self) -> bool {
        let mut state = self.state.write().unwrap();
        if state.selections.team.take().is_none() {
            return false;
        }
        let mut changes = vec![OrganizerChange::SelectedTeamChanged(None)];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    // ------------------------------------------------------------------
    // Selection: authors

    pub fn selected_author(&self) -> Option<Arc<AuthorInfo>> {
        self.state.read().unwrap().selections.author.clone()
    }

    pub fn select_author(&self, index: usize) -> bool {
        let mut state = self.state.write().unwrap();
        let Some(author) = state.organized.authors.get(index).cloned() else {
            self.reject_index(index, state.organized.authors.len(), "author");
            return false;
        };
        if state
            .selections
            .author
            .as_ref()
            .is_some_and(|a| a.name.eq_ignore_ascii_case(&author.name))
        {
            return true;
        }
        state.selections.author = Some(author.clone());
        let mut changes = vec![OrganizerChange::SelectedAuthorChanged(Some(author))];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    pub fn select_author_with_name(&self, name: &str) -> bool {
        let position = {
            let state = self.state.read().unwrap();
            state
                .organized
                .authors
                .iter()
                .position(|a| a.name.eq_ignore_ascii_case(name))
        };
        match position {
            Some(index) => self.select_author(index),
            None => {
                self.metrics.record_rejected_request();
                false
            }
        }
    }

    pub fn select_random_author(&self) -> bool {
        let len = self.state.read().unwrap().organized.authors.len();
        match self.random_index(len) {
            Some(index) => self.select_author(index),
            None => false,
        }
    }

    pub fn clear_selected_author(&self) -> bool {
        let mut state = self.state.write().unwrap();
        if state.selections.author.take().is_none() {
            return false;
        }
        let mut changes = vec![OrganizerChange::SelectedAuthorChanged(None)];
        changes.extend(self.reorganize(&mut state));
        self.emit_all(changes);
        true
    }

    // ------------------------------------------------------------------
    // Internals

    fn mods_snapshot(&self) -> Vec<Arc<GameMod>> {
        self.mods
            .as_ref()
            .map(|collection| collection.read().unwrap().mods().to_vec())
            .unwrap_or_default()
    }

    fn favourites_snapshot(&self) -> Vec<Arc<FavouriteModIdentifier>> {
        self.favourites
            .as_ref()
            .map(|collection| collection.read().unwrap().favourites().to_vec())
            .unwrap_or_default()
    }

    fn game_versions_snapshot(&self) -> Vec<Arc<GameVersion>> {
        self.game_versions
            .as_ref()
            .map(|collection| collection.read().unwrap().game_versions().to_vec())
            .unwrap_or_default()
    }

    /// Recomputes everything derived from the mod collection: aggregate
    /// counts and the team/author rosters.
    fn refresh_derived(&self, state: &mut OrganizerState) {
        let mods = self.mods_snapshot();
        state.counts = GameVersionCounts::compute(&mods, &self.game_versions_snapshot());
        state.team_roster = authors::derive_teams(&mods);
        state.author_roster = authors::derive_authors(&mods);
    }

    fn build_lists(
        state: &OrganizerState,
        selections: &Selections,
        mods: &[Arc<GameMod>],
        favourites: &[Arc<FavouriteModIdentifier>],
        game_versions: &[Arc<GameVersion>],
    ) -> OrganizedLists {
        let context = FilterContext {
            favourites,
            selected_game_version: selections.game_version.as_deref(),
            selected_team: selections.team.as_deref(),
            selected_author: selections.author.as_deref(),
        };
        let filtered = filter::filter_mods(mods, state.filter_type, context);

        OrganizedLists {
            mods: sort::sort_mods(&filtered, state.sort_type, state.sort_direction),
            favourites: sort::sort_favourites(favourites, state.sort_type, state.sort_direction),
            game_versions: sort::sort_game_versions(
                game_versions,
                state.sort_type,
                state.sort_direction,
                &state.counts,
            ),
            teams: sort::sort_authors(&state.team_roster, state.sort_type, state.sort_direction),
            authors: sort::sort_authors(&state.author_roster, state.sort_type, state.sort_direction),
        }
    }

    /// The full organize pass: filter, sort, selection repair, sort
    /// fallback. Returns the events to emit; the caller holds the lock.
    fn reorganize(&self, state: &mut OrganizerState) -> Vec<OrganizerChange> {
        self.metrics.record_organize_pass();

        let mods = self.mods_snapshot();
        let favourites = self.favourites_snapshot();
        let game_versions = self.game_versions_snapshot();

        let mut organized = Self::build_lists(state, &state.selections, &mods, &favourites, &game_versions);
        let mut selections = state.selections.clone();
        let mut report = RepairReport::default();

        // A cleared game version, team or author changes what the filter
        // keeps, so rebuild and repair again until every surviving slot is
        // present in the rebuilt lists. Each of those three slots clears at
        // most once, so this runs at most four passes.
        loop {
            let (repaired, pass) = repair_selections(&selections, &organized);
            selections = repaired;
            report = report.merge(&pass);
            if !(pass.game_version_cleared || pass.team_cleared || pass.author_cleared) {
                break;
            }
            organized = Self::build_lists(state, &selections, &mods, &favourites, &game_versions);
        }
        state.selections = selections;
        self.metrics.record_selections_repaired(report.cleared_count());

        let mut changes = Vec::new();

        // Clearing a selection can invalidate the active sort type; fall
        // back to the first valid one and re-sort.
        if !validity::is_valid_sort_type(
            state.sort_type,
            state.filter_type,
            state.selections.has_selected_game_version(),
            state.selections.has_selected_team(),
            state.selections.has_selected_author(),
        ) {
            let fallback = validity::valid_sort_types(
                state.filter_type,
                state.selections.has_selected_game_version(),
                state.selections.has_selected_team(),
                state.selections.has_selected_author(),
            )[0];
            tracing::debug!(
                from = %state.sort_type,
                to = %fallback,
                "sort type invalidated by selection change, falling back"
            );
            state.sort_type = fallback;
            organized = Self::build_lists(state, &state.selections, &mods, &favourites, &game_versions);
            changes.push(OrganizerChange::SortOptionsChanged {
                sort_type: state.sort_type,
                sort_direction: state.sort_direction,
            });
        }

        if state.organized.mods != organized.mods {
            changes.push(OrganizerChange::OrganizedModsChanged(organized.mods.clone()));
        }
        if state.organized.favourites != organized.favourites {
            changes.push(OrganizerChange::OrganizedFavouriteModsChanged(
                organized.favourites.clone(),
            ));
        }
        if state.organized.game_versions != organized.game_versions {
            changes.push(OrganizerChange::OrganizedGameVersionsChanged(
                organized.game_versions.clone(),
            ));
        }
        if state.organized.teams != organized.teams {
            changes.push(OrganizerChange::OrganizedTeamsChanged(organized.teams.clone()));
        }
        if state.organized.authors != organized.authors {
            changes.push(OrganizerChange::OrganizedAuthorsChanged(organized.authors.clone()));
        }
        state.organized = organized;

        if report.mod_cleared {
            changes.push(OrganizerChange::SelectedModChanged(None));
        }
        if report.favourite_cleared {
            changes.push(OrganizerChange::SelectedFavouriteModChanged(None));
        }
        if report.game_version_cleared {
            changes.push(OrganizerChange::SelectedGameVersionChanged(None));
        }
        if report.team_cleared {
            changes.push(OrganizerChange::SelectedTeamChanged(None));
        }
        if report.author_cleared {
            changes.push(OrganizerChange::SelectedAuthorChanged(None));
        }

        changes
    }

    fn emit_all(&self, changes: Vec<OrganizerChange>) {
        for change in changes {
            match self.change_tx.send(change) {
                Ok(_) => self.metrics.record_event_broadcast(),
                // No active subscribers; normal during startup and teardown.
                Err(_) => self.metrics.record_event_unobserved(),
            }
        }
    }

    fn random_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(rand::rng().random_range(0..len))
        }
    }

    fn reject_index(&self, index: usize, len: usize, category: &str) {
        tracing::debug!(index, len, category, "selection index out of bounds");
        self.metrics.record_rejected_request();
    }
}

impl Default for OrganizerManager {
    fn default() -> Self {
        Self::new()
    }
}

// Cloning shares the same state, collections and channel.
impl Clone for OrganizerManager {
    fn clone(&self) -> Self {
        Self {
            mods: self.mods.clone(),
            favourites: self.favourites.clone(),
            game_versions: self.game_versions.clone(),
            state: Arc::clone(&self.state),
            change_tx: self.change_tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::{ModVersion, ModVersionType};

    fn mod_named(id: &str, name: &str) -> GameMod {
        let mut game_mod = GameMod::new(id, name);
        game_mod.versions.push(ModVersion::new(None, None));
        game_mod
    }

    fn mod_supporting(id: &str, name: &str, game_version_ids: &[&str]) -> GameMod {
        let mut game_mod = GameMod::new(id, name);
        let mut version = ModVersion::new(None, None);
        version.supported_game_version_ids =
            game_version_ids.iter().map(|s| s.to_string()).collect();
        game_mod.versions.push(version);
        game_mod
    }

    fn manager_with_mods(mods: Vec<GameMod>) -> OrganizerManager {
        let mut collection = ModCollection::new();
        for game_mod in mods {
            collection.add_mod(game_mod);
        }
        OrganizerManager::with_collections(Some(Arc::new(RwLock::new(collection))), None, None)
    }

    #[test]
    fn test_new_manager_defaults() {
        let manager = OrganizerManager::new();
        assert_eq!(manager.filter_type(), FilterType::None);
        assert_eq!(manager.sort_type(), SortType::Unsorted);
        assert_eq!(manager.sort_direction(), SortDirection::Ascending);
        assert!(manager.organized_mods().is_empty());
        assert!(manager.selected_mod().is_none());
        assert_eq!(manager.browse_context(), BrowseContext::Mods);
    }

    #[test]
    fn test_initial_organize_shows_all_mods() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha"), mod_named("m2", "Beta")]);
        assert_eq!(manager.organized_mods().len(), 2);
    }

    #[test]
    fn test_set_sort_type_emits_and_reorders() {
        let manager = manager_with_mods(vec![mod_named("m1", "beta"), mod_named("m2", "Alpha")]);
        let mut rx = manager.subscribe();

        assert!(manager.set_sort_type(SortType::Name));

        let event = rx.try_recv().unwrap();
        assert!(matches!(
            event,
            OrganizerChange::SortOptionsChanged {
                sort_type: SortType::Name,
                ..
            }
        ));
        let event = rx.try_recv().unwrap();
        assert!(matches!(event, OrganizerChange::OrganizedModsChanged(_)));
        assert_eq!(manager.organized_mods()[0].name, "Alpha");
    }

    #[test]
    fn test_invalid_sort_type_rejected_without_events() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha")]);
        assert!(manager.set_filter_type(FilterType::Favourites));
        let mut rx = manager.subscribe();

        assert!(!manager.set_sort_type(SortType::NumberOfSupportedMods));

        assert!(rx.try_recv().is_err());
        assert_eq!(manager.sort_type(), SortType::Unsorted);
    }

    #[test]
    fn test_invalid_filter_change_rejected() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha")]);
        assert!(manager.set_sort_type(SortType::LatestReleaseDate));

        // Date sorts do not apply while browsing teams.
        assert!(!manager.set_filter_type(FilterType::Teams));
        assert_eq!(manager.filter_type(), FilterType::None);
        assert_eq!(manager.sort_type(), SortType::LatestReleaseDate);
    }

    #[test]
    fn test_setting_same_filter_is_a_silent_success() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha")]);
        let mut rx = manager.subscribe();
        assert!(manager.set_filter_type(FilterType::None));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_downloaded_filter() {
        let mut with_file = mod_named("m1", "Alpha");
        with_file.versions[0].version_types = vec![ModVersionType::new(None, true)];
        let manager = manager_with_mods(vec![with_file, mod_named("m2", "Beta")]);

        assert!(manager.set_filter_type(FilterType::Downloaded));
        let organized = manager.organized_mods();
        assert_eq!(organized.len(), 1);
        assert_eq!(organized[0].id, "m1");
    }

    #[test]
    fn test_select_mod_by_index_and_bounds() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha"), mod_named("m2", "Beta")]);
        let mut rx = manager.subscribe();

        assert!(!manager.select_mod(5));
        assert!(rx.try_recv().is_err());

        assert!(manager.select_mod(1));
        assert_eq!(manager.selected_mod().unwrap().id, "m2");
        let event = rx.try_recv().unwrap();
        assert!(matches!(event, OrganizerChange::SelectedModChanged(Some(_))));

        // Re-selecting the same mod emits nothing.
        assert!(manager.select_mod(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_select_mod_with_id() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha"), mod_named("m2", "Beta")]);
        assert!(manager.select_mod_with_id("m2"));
        assert_eq!(manager.selected_mod().unwrap().name, "Beta");
        assert!(!manager.select_mod_with_id("missing"));
    }

    #[test]
    fn test_select_random_mod_from_empty_list_fails() {
        let manager = OrganizerManager::new();
        assert!(!manager.select_random_mod());
    }

    #[test]
    fn test_select_random_mod_lands_in_list() {
        let manager = manager_with_mods(vec![
            mod_named("m1", "Alpha"),
            mod_named("m2", "Beta"),
            mod_named("m3", "Gamma"),
        ]);
        assert!(manager.select_random_mod());
        let selected = manager.selected_mod().unwrap();
        assert!(manager.organized_mods().iter().any(|m| m.id == selected.id));
    }

    #[test]
    fn test_game_version_selection_switches_context() {
        let mut game_versions = GameVersionCollection::new();
        game_versions.add_game_version(GameVersion::new("regular", "Regular"));
        let mut mods = ModCollection::new();
        mods.add_mod(mod_supporting("m1", "Alpha", &["regular"]));
        mods.add_mod(mod_supporting("m2", "Beta", &["atomic"]));

        let manager = OrganizerManager::with_collections(
            Some(Arc::new(RwLock::new(mods))),
            None,
            Some(Arc::new(RwLock::new(game_versions))),
        );

        assert!(manager.set_filter_type(FilterType::SupportedGameVersions));
        assert_eq!(manager.browse_context(), BrowseContext::GameVersions);
        assert!(manager.organized_mods().is_empty());
        assert!(manager.valid_sort_types().contains(&SortType::NumberOfSupportedMods));

        assert!(manager.select_game_version(0));
        assert_eq!(manager.browse_context(), BrowseContext::Mods);
        let organized = manager.organized_mods();
        assert_eq!(organized.len(), 1);
        assert_eq!(organized[0].id, "m1");
    }

    #[test]
    fn test_sort_falls_back_when_selection_changes_context() {
        let mut game_versions = GameVersionCollection::new();
        game_versions.add_game_version(GameVersion::new("regular", "Regular"));
        let manager = OrganizerManager::with_collections(
            None,
            None,
            Some(Arc::new(RwLock::new(game_versions))),
        );

        assert!(manager.set_filter_type(FilterType::SupportedGameVersions));
        assert!(manager.set_sort_type(SortType::NumberOfSupportedMods));
        let mut rx = manager.subscribe();

        assert!(manager.select_game_version(0));

        assert_eq!(manager.sort_type(), SortType::Unsorted);
        let mut saw_fallback = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(
                event,
                OrganizerChange::SortOptionsChanged {
                    sort_type: SortType::Unsorted,
                    ..
                }
            ) {
                saw_fallback = true;
            }
        }
        assert!(saw_fallback);
    }

    #[test]
    fn test_team_browsing_and_selection() {
        let mut with_team = mod_named("m1", "Alpha");
        with_team.team = Some("Reload Team".to_string());
        let mut other = mod_named("m2", "Beta");
        other.team = Some("Other Crew".to_string());
        let manager = manager_with_mods(vec![with_team, other, mod_named("m3", "Gamma")]);

        assert!(manager.set_filter_type(FilterType::Teams));
        assert_eq!(manager.browse_context(), BrowseContext::Teams);
        assert_eq!(manager.organized_teams().len(), 2);
        assert!(manager.organized_mods().is_empty());

        assert!(manager.select_team_with_name("reload team"));
        assert_eq!(manager.browse_context(), BrowseContext::Mods);
        let organized = manager.organized_mods();
        assert_eq!(organized.len(), 1);
        assert_eq!(organized[0].id, "m1");

        assert!(manager.clear_selected_team());
        assert!(manager.organized_mods().is_empty());
    }

    #[test]
    fn test_notify_mods_updated_refreshes_everything() {
        let collection = Arc::new(RwLock::new(ModCollection::new()));
        let manager =
            OrganizerManager::with_collections(Some(Arc::clone(&collection)), None, None);
        assert!(manager.organized_mods().is_empty());

        collection.write().unwrap().add_mod(mod_named("m1", "Alpha"));
        manager.notify(CollectionChange::ModsUpdated);

        assert_eq!(manager.organized_mods().len(), 1);
    }

    #[test]
    fn test_aggregates_follow_game_version_modification() {
        let mods = Arc::new(RwLock::new(ModCollection::new()));
        mods.write().unwrap().add_mod(mod_supporting("m1", "Alpha", &["regular"]));
        let game_versions = Arc::new(RwLock::new(GameVersionCollection::new()));
        game_versions.write().unwrap().add_game_version(GameVersion::new("regular", "Regular"));
        game_versions.write().unwrap().add_game_version(GameVersion::new("atomic", "Atomic"));

        let manager = OrganizerManager::with_collections(
            Some(Arc::clone(&mods)),
            None,
            Some(Arc::clone(&game_versions)),
        );
        assert_eq!(manager.supported_mod_count("atomic"), 0);
        assert_eq!(manager.compatible_mod_count("atomic"), 0);

        // Atomic learns to run regular content.
        let mut atomic = GameVersion::new("atomic", "Atomic");
        atomic.compatible_game_versions = vec!["regular".to_string()];
        game_versions.write().unwrap().update_game_version(atomic);
        manager.notify(CollectionChange::GameVersionModified("atomic".to_string()));

        assert_eq!(manager.supported_mod_count("atomic"), 0);
        assert_eq!(manager.compatible_mod_count("atomic"), 1);
    }

    #[test]
    fn test_selection_cleared_when_filtered_out() {
        let mut with_file = mod_named("m1", "Alpha");
        with_file.versions[0].version_types = vec![ModVersionType::new(None, true)];
        let manager = manager_with_mods(vec![with_file, mod_named("m2", "Beta")]);

        assert!(manager.select_mod_with_id("m2"));
        let mut rx = manager.subscribe();

        assert!(manager.set_filter_type(FilterType::Downloaded));

        assert!(manager.selected_mod().is_none());
        let mut none_events = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, OrganizerChange::SelectedModChanged(None)) {
                none_events += 1;
            }
        }
        assert_eq!(none_events, 1);
    }

    #[test]
    fn test_removed_game_version_clears_dependent_mod_selection() {
        let mods = Arc::new(RwLock::new(ModCollection::new()));
        mods.write().unwrap().add_mod(mod_supporting("m1", "Alpha", &["regular"]));
        let game_versions = Arc::new(RwLock::new(GameVersionCollection::new()));
        game_versions.write().unwrap().add_game_version(GameVersion::new("regular", "Regular"));
        let manager = OrganizerManager::with_collections(
            Some(Arc::clone(&mods)),
            None,
            Some(Arc::clone(&game_versions)),
        );

        assert!(manager.set_filter_type(FilterType::SupportedGameVersions));
        assert!(manager.select_game_version(0));
        assert!(manager.select_mod(0));
        let mut rx = manager.subscribe();

        game_versions.write().unwrap().remove_game_version_with_id("regular");
        manager.notify(CollectionChange::GameVersionsSizeChanged);

        // Losing the game version empties the mod list, so the mod
        // selection must not survive pointing at a filtered-out entity.
        assert!(manager.organized_mods().is_empty());
        assert!(manager.selected_game_version().is_none());
        assert!(manager.selected_mod().is_none());

        let mut mod_cleared = 0;
        let mut game_version_cleared = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                OrganizerChange::SelectedModChanged(None) => mod_cleared += 1,
                OrganizerChange::SelectedGameVersionChanged(None) => game_version_cleared += 1,
                _ => {}
            }
        }
        assert_eq!(mod_cleared, 1);
        assert_eq!(game_version_cleared, 1);
    }

    #[test]
    fn test_settings_round_trip() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha")]);
        let settings = OrganizerSettings {
            filter_type: FilterType::Downloaded,
            sort_type: SortType::Name,
            sort_direction: SortDirection::Descending,
        };
        assert!(manager.apply_settings(&settings));
        assert_eq!(manager.settings(), settings);

        let invalid = OrganizerSettings {
            filter_type: FilterType::None,
            sort_type: SortType::NumberOfMods,
            sort_direction: SortDirection::Ascending,
        };
        assert!(!manager.apply_settings(&invalid));
        assert_eq!(manager.settings(), settings);
    }

    #[test]
    fn test_clone_shares_state() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha")]);
        let clone = manager.clone();
        assert!(manager.select_mod(0));
        assert_eq!(clone.selected_mod().unwrap().id, "m1");
    }

    #[test]
    fn test_metrics_track_activity() {
        let manager = manager_with_mods(vec![mod_named("m1", "Alpha")]);
        let metrics = manager.metrics();
        let passes_before = metrics
            .organize_passes
            .load(std::sync::atomic::Ordering::Relaxed);

        manager.organize();
        assert!(!manager.select_mod(99));

        assert_eq!(
            metrics.organize_passes.load(std::sync::atomic::Ordering::Relaxed),
            passes_before + 1
        );
        assert_eq!(
            metrics.rejected_requests.load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }
}
