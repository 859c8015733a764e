//! Upstream collection stores.
//!
//! These are the three independently-owned datasets the organizer derives
//! its views from. They are plain enumerable stores: mutating one never
//! notifies anyone by itself. The owner mutates a collection and then calls
//! [`OrganizerManager::notify`](crate::state::OrganizerManager::notify) with
//! the matching [`CollectionChange`](crate::state::CollectionChange), which
//! replaces the signal/slot wiring of older mod-manager designs with an
//! explicit, typed message.
//!
//! The organizer holds shared read access (`Arc<RwLock<…>>`) and never
//! mutates these stores.

use crate::models::entities::{FavouriteModIdentifier, GameMod, GameVersion};
use std::sync::Arc;

/// Enumerable store of all known mods.
#[derive(Debug, Clone, Default)]
pub struct ModCollection {
    mods: Vec<Arc<GameMod>>,
}

impl ModCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn mods(&self) -> &[Arc<GameMod>] {
        &self.mods
    }

    pub fn get(&self, index: usize) -> Option<Arc<GameMod>> {
        self.mods.get(index).cloned()
    }

    pub fn mod_with_id(&self, id: &str) -> Option<Arc<GameMod>> {
        self.mods.iter().find(|m| m.id == id).cloned()
    }

    pub fn mod_with_name(&self, name: &str) -> Option<Arc<GameMod>> {
        self.mods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Appends a mod, replacing any existing entry with the same id.
    pub fn add_mod(&mut self, game_mod: GameMod) {
        self.mods.retain(|existing| existing.id != game_mod.id);
        self.mods.push(Arc::new(game_mod));
    }

    pub fn remove_mod_with_id(&mut self, id: &str) -> bool {
        let before = self.mods.len();
        self.mods.retain(|m| m.id != id);
        self.mods.len() != before
    }

    pub fn clear(&mut self) {
        self.mods.clear();
    }
}

/// Enumerable store of user-pinned favourite mod identifiers.
#[derive(Debug, Clone, Default)]
pub struct FavouriteModCollection {
    favourites: Vec<Arc<FavouriteModIdentifier>>,
}

impl FavouriteModCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.favourites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favourites.is_empty()
    }

    pub fn favourites(&self) -> &[Arc<FavouriteModIdentifier>] {
        &self.favourites
    }

    pub fn get(&self, index: usize) -> Option<Arc<FavouriteModIdentifier>> {
        self.favourites.get(index).cloned()
    }

    /// Whether any pinned identifier points at the given mod.
    pub fn has_favourite_of(&self, game_mod: &GameMod) -> bool {
        self.favourites.iter().any(|f| game_mod.matches_favourite(f))
    }

    pub fn has_favourite(&self, name: &str, version: Option<&str>, version_type: Option<&str>) -> bool {
        self.favourites
            .iter()
            .any(|f| f.matches(name, version, version_type))
    }

    /// Appends an identifier unless the exact triple is already pinned.
    pub fn add_favourite(&mut self, favourite: FavouriteModIdentifier) -> bool {
        if self.has_favourite(
            &favourite.name,
            favourite.version.as_deref(),
            favourite.version_type.as_deref(),
        ) {
            return false;
        }
        self.favourites.push(Arc::new(favourite));
        true
    }

    pub fn remove_favourite(
        &mut self,
        name: &str,
        version: Option<&str>,
        version_type: Option<&str>,
    ) -> bool {
        let before = self.favourites.len();
        self.favourites.retain(|f| !f.matches(name, version, version_type));
        self.favourites.len() != before
    }

    pub fn clear(&mut self) {
        self.favourites.clear();
    }
}

/// Enumerable store of configured game versions.
#[derive(Debug, Clone, Default)]
pub struct GameVersionCollection {
    game_versions: Vec<Arc<GameVersion>>,
}

impl GameVersionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.game_versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.game_versions.is_empty()
    }

    pub fn game_versions(&self) -> &[Arc<GameVersion>] {
        &self.game_versions
    }

    pub fn get(&self, index: usize) -> Option<Arc<GameVersion>> {
        self.game_versions.get(index).cloned()
    }

    pub fn game_version_with_id(&self, id: &str) -> Option<Arc<GameVersion>> {
        self.game_versions.iter().find(|g| g.id == id).cloned()
    }

    /// Appends a game version, replacing any existing entry with the same id.
    pub fn add_game_version(&mut self, game_version: GameVersion) {
        self.game_versions.retain(|existing| existing.id != game_version.id);
        self.game_versions.push(Arc::new(game_version));
    }

    /// Replaces an existing entry in place, keeping its position.
    ///
    /// Used for item modification (e.g. an edited compatibility list) so the
    /// collection keeps its ordering; returns false when the id is unknown.
    pub fn update_game_version(&mut self, game_version: GameVersion) -> bool {
        match self.game_versions.iter_mut().find(|g| g.id == game_version.id) {
            Some(slot) => {
                *slot = Arc::new(game_version);
                true
            }
            None => false,
        }
    }

    pub fn remove_game_version_with_id(&mut self, id: &str) -> bool {
        let before = self.game_versions.len();
        self.game_versions.retain(|g| g.id != id);
        self.game_versions.len() != before
    }

    pub fn clear(&mut self) {
        self.game_versions.clear();
    }
}
