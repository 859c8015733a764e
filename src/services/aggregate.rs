//! The aggregate calculator.
//!
//! Derives, per game version, how many mods support it and how many are
//! compatible with it. The counts are global statistics over the unfiltered
//! mod collection, recomputed only when mods or game versions change and
//! cached here; the sort stage and any other consumer read the cache and
//! never recompute inline.

use crate::models::entities::{GameMod, GameVersion};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-game-version mod counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModCounts {
    /// Mods declaring this game version as supported.
    pub supported: usize,

    /// Mods that can run on this game version, directly or through its
    /// compatibility list. Always >= `supported`.
    pub compatible: usize,
}

/// Cache of aggregate counts keyed by game-version id, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameVersionCounts {
    counts: IndexMap<String, ModCounts>,
}

impl GameVersionCounts {
    /// Recomputes all counts with one pass over the unfiltered mod list,
    /// O(mods x versionsPerMod).
    ///
    /// The compatibility graph is inverted up front into a reverse index
    /// (supported id -> game versions able to run content targeting it), so
    /// each mod only touches the ids it actually declares.
    pub fn compute(mods: &[Arc<GameMod>], game_versions: &[Arc<GameVersion>]) -> Self {
        let mut counts: IndexMap<String, ModCounts> = game_versions
            .iter()
            .map(|g| (g.id.clone(), ModCounts::default()))
            .collect();

        let mut runners: HashMap<&str, Vec<&str>> = HashMap::new();
        for game_version in game_versions {
            runners
                .entry(game_version.id.as_str())
                .or_default()
                .push(game_version.id.as_str());
            for id in &game_version.compatible_game_versions {
                runners.entry(id.as_str()).or_default().push(game_version.id.as_str());
            }
        }

        for game_mod in mods {
            let supported_ids = game_mod.supported_game_version_ids();
            for id in &supported_ids {
                if let Some(entry) = counts.get_mut(id.as_str()) {
                    entry.supported += 1;
                }
            }

            // A mod counts once per compatible game version even when it
            // supports several ids that game version can run.
            let mut compatible: Vec<&str> = supported_ids
                .iter()
                .filter_map(|id| runners.get(id.as_str()))
                .flatten()
                .copied()
                .collect();
            compatible.sort_unstable();
            compatible.dedup();
            for id in compatible {
                if let Some(entry) = counts.get_mut(id) {
                    entry.compatible += 1;
                }
            }
        }

        tracing::debug!(
            mods = mods.len(),
            game_versions = game_versions.len(),
            "recomputed game version mod counts"
        );

        Self { counts }
    }

    pub fn supported_mod_count(&self, game_version_id: &str) -> usize {
        self.counts
            .get(game_version_id)
            .map_or(0, |entry| entry.supported)
    }

    pub fn compatible_mod_count(&self, game_version_id: &str) -> usize {
        self.counts
            .get(game_version_id)
            .map_or(0, |entry| entry.compatible)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
