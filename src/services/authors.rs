//! Team and author roster derivation.
//!
//! The upstream datasets carry no author entities; the rosters are derived
//! here from mod credit metadata whenever the mod collection changes.
//! Identities merge case-insensitively, keeping the first-seen spelling and
//! the collection's encounter order.

use crate::models::entities::{AuthorInfo, AuthorType, GameMod};
use indexmap::IndexMap;
use std::sync::Arc;

fn collect(names: impl Iterator<Item = String>, author_type: AuthorType) -> Vec<Arc<AuthorInfo>> {
    let mut roster: IndexMap<String, AuthorInfo> = IndexMap::new();

    for name in names {
        let key = name.to_lowercase();
        roster
            .entry(key)
            .or_insert_with(|| AuthorInfo::new(&name, author_type))
            .increment_mod_count();
    }

    roster.into_values().map(Arc::new).collect()
}

/// Derives the team roster from mod metadata, with running mod counts.
pub fn derive_teams(mods: &[Arc<GameMod>]) -> Vec<Arc<AuthorInfo>> {
    collect(
        mods.iter().filter_map(|m| m.team.clone()),
        AuthorType::Team,
    )
}

/// Derives the individual-author roster from mod metadata.
///
/// A mod crediting the same author twice still counts once per mod.
pub fn derive_authors(mods: &[Arc<GameMod>]) -> Vec<Arc<AuthorInfo>> {
    let names = mods.iter().flat_map(|m| {
        let mut seen: Vec<String> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        for author in &m.authors {
            let key = author.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                names.push(author.clone());
            }
        }
        names.into_iter()
    });
    collect(names, AuthorType::Individual)
}
