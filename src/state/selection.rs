//! Selection slots and their repair pass.
//!
//! The engine tracks at most one selected entity per category. After every
//! organize, each slot is checked against the freshly organized lists: a
//! selection whose entity was filtered out or removed upstream is cleared,
//! and the caller fires exactly one "changed to none" event for it. Nothing
//! is ever auto-promoted into an empty slot.
//!
//! The repair pass is a pure function over value snapshots so the
//! invalidation rules can be tested without an engine instance.

use crate::models::entities::{AuthorInfo, FavouriteModIdentifier, GameMod, GameVersion};
use std::sync::Arc;

/// The five organized projections produced by an organize pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizedLists {
    pub mods: Vec<Arc<GameMod>>,
    pub favourites: Vec<Arc<FavouriteModIdentifier>>,
    pub game_versions: Vec<Arc<GameVersion>>,
    pub teams: Vec<Arc<AuthorInfo>>,
    pub authors: Vec<Arc<AuthorInfo>>,
}

/// At most one selected entity per category.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    pub game_mod: Option<Arc<GameMod>>,
    pub favourite: Option<Arc<FavouriteModIdentifier>>,
    pub game_version: Option<Arc<GameVersion>>,
    pub team: Option<Arc<AuthorInfo>>,
    pub author: Option<Arc<AuthorInfo>>,
}

impl Selections {
    pub fn has_selected_game_version(&self) -> bool {
        self.game_version.is_some()
    }

    pub fn has_selected_team(&self) -> bool {
        self.team.is_some()
    }

    pub fn has_selected_author(&self) -> bool {
        self.author.is_some()
    }
}

/// Which slots a repair pass cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub mod_cleared: bool,
    pub favourite_cleared: bool,
    pub game_version_cleared: bool,
    pub team_cleared: bool,
    pub author_cleared: bool,
}

impl RepairReport {
    /// Combines the clears from two repair passes.
    pub fn merge(&self, other: &RepairReport) -> RepairReport {
        RepairReport {
            mod_cleared: self.mod_cleared || other.mod_cleared,
            favourite_cleared: self.favourite_cleared || other.favourite_cleared,
            game_version_cleared: self.game_version_cleared || other.game_version_cleared,
            team_cleared: self.team_cleared || other.team_cleared,
            author_cleared: self.author_cleared || other.author_cleared,
        }
    }

    pub fn any_cleared(&self) -> bool {
        self.mod_cleared
            || self.favourite_cleared
            || self.game_version_cleared
            || self.team_cleared
            || self.author_cleared
    }

    pub fn cleared_count(&self) -> usize {
        usize::from(self.mod_cleared)
            + usize::from(self.favourite_cleared)
            + usize::from(self.game_version_cleared)
            + usize::from(self.team_cleared)
            + usize::from(self.author_cleared)
    }
}

fn repair_slot<T, F>(slot: &Option<Arc<T>>, list: &[Arc<T>], same: F) -> (Option<Arc<T>>, bool)
where
    F: Fn(&T, &T) -> bool,
{
    match slot {
        Some(selected) => match list.iter().find(|entity| same(entity, selected)) {
            Some(current) => (Some(current.clone()), false),
            None => (None, true),
        },
        None => (None, false),
    }
}

/// Clears every slot whose entity is absent from its organized list, and
/// refreshes surviving slots to the current list entry (an upstream edit
/// may have replaced the snapshot behind the same identity).
///
/// Identity is id-based for mods and game versions, full-triple for
/// favourites and case-insensitive name for teams and authors, matching
/// how the lists themselves are keyed.
pub fn repair_selections(selections: &Selections, lists: &OrganizedLists) -> (Selections, RepairReport) {
    let (game_mod, mod_cleared) =
        repair_slot(&selections.game_mod, &lists.mods, |a, b| a.id == b.id);
    let (favourite, favourite_cleared) = repair_slot(&selections.favourite, &lists.favourites, |a, b| {
        a.matches(&b.name, b.version.as_deref(), b.version_type.as_deref())
    });
    let (game_version, game_version_cleared) =
        repair_slot(&selections.game_version, &lists.game_versions, |a, b| a.id == b.id);
    let (team, team_cleared) = repair_slot(&selections.team, &lists.teams, |a, b| {
        a.name.eq_ignore_ascii_case(&b.name)
    });
    let (author, author_cleared) = repair_slot(&selections.author, &lists.authors, |a, b| {
        a.name.eq_ignore_ascii_case(&b.name)
    });

    (
        Selections {
            game_mod,
            favourite,
            game_version,
            team,
            author,
        },
        RepairReport {
            mod_cleared,
            favourite_cleared,
            game_version_cleared,
            team_cleared,
            author_cleared,
        },
    )
}
