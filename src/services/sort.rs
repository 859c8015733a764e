//! The sort stage.
//!
//! One generic stable merge sort drives every organized list; the
//! per-entity functions only pick the comparator for the active
//! `(SortType, entity kind)` pair. The merge sort never assumes the
//! comparator is a strict total order: ties keep their prior relative
//! order, which is what makes repeated organizes deterministic.
//!
//! Direction is applied inside the comparator rather than by reversing the
//! sorted list, so missing release dates sort last regardless of direction
//! and tie runs keep insertion order either way.

use crate::models::entities::{AuthorInfo, FavouriteModIdentifier, GameMod, GameVersion};
use crate::models::options::{SortDirection, SortType};
use crate::services::aggregate::GameVersionCounts;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::sync::Arc;

/// Stable merge sort over a slice, returning a new vector.
///
/// Top-down split and merge; when the comparator reports anything but
/// `Greater` the left element wins, preserving the input order of ties.
pub fn merge_sort_by<T, F>(items: &[T], mut compare: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    fn sort<T: Clone, F: FnMut(&T, &T) -> Ordering>(items: &[T], compare: &mut F) -> Vec<T> {
        if items.len() <= 1 {
            return items.to_vec();
        }
        let middle = items.len() / 2;
        let left = sort(&items[..middle], compare);
        let right = sort(&items[middle..], compare);
        merge(left, right, compare)
    }

    fn merge<T, F: FnMut(&T, &T) -> Ordering>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T> {
        let mut merged = Vec::with_capacity(left.len() + right.len());
        let mut left_iter = left.into_iter().peekable();
        let mut right_iter = right.into_iter().peekable();

        loop {
            match (left_iter.peek(), right_iter.peek()) {
                (Some(l), Some(r)) => {
                    if compare(l, r) == Ordering::Greater {
                        merged.push(right_iter.next().unwrap());
                    } else {
                        merged.push(left_iter.next().unwrap());
                    }
                }
                (Some(_), None) => merged.push(left_iter.next().unwrap()),
                (None, Some(_)) => merged.push(right_iter.next().unwrap()),
                (None, None) => break,
            }
        }
        merged
    }

    sort(items, &mut compare)
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Missing dates always compare greater, so they land at the end of the
/// list in both directions.
fn compare_dates(
    a: Option<chrono::NaiveDate>,
    b: Option<chrono::NaiveDate>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => directed(a.cmp(&b), direction),
    }
}

/// Count comparison with the name-ascending tie break shared by every
/// NumberOf* sort type.
fn compare_counts(
    a_count: usize,
    b_count: usize,
    a_name: &str,
    b_name: &str,
    direction: SortDirection,
) -> Ordering {
    directed(a_count.cmp(&b_count), direction).then_with(|| compare_names(a_name, b_name))
}

fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(&mut rand::rng());
    shuffled
}

/// Sorts the organized mod list.
///
/// Sort types that do not apply to mods leave the list in collection order;
/// the validity matrix keeps the engine from committing them, so this arm
/// is only reachable transiently while another organized list is the
/// meaningful one.
pub fn sort_mods(mods: &[Arc<GameMod>], sort_type: SortType, direction: SortDirection) -> Vec<Arc<GameMod>> {
    match sort_type {
        SortType::Name => merge_sort_by(mods, |a, b| directed(compare_names(&a.name, &b.name), direction)),
        SortType::InitialReleaseDate => merge_sort_by(mods, |a, b| {
            compare_dates(a.initial_release_date(), b.initial_release_date(), direction)
        }),
        SortType::LatestReleaseDate => merge_sort_by(mods, |a, b| {
            compare_dates(a.latest_release_date(), b.latest_release_date(), direction)
        }),
        SortType::NumberOfVersions => merge_sort_by(mods, |a, b| {
            compare_counts(
                a.number_of_versions(),
                b.number_of_versions(),
                &a.name,
                &b.name,
                direction,
            )
        }),
        SortType::Random => shuffled(mods),
        SortType::Unsorted
        | SortType::NumberOfMods
        | SortType::NumberOfSupportedMods
        | SortType::NumberOfCompatibleMods => mods.to_vec(),
    }
}

/// Sorts the organized favourite list. Only name ordering applies to the
/// pinned identifiers; everything else keeps insertion order.
pub fn sort_favourites(
    favourites: &[Arc<FavouriteModIdentifier>],
    sort_type: SortType,
    direction: SortDirection,
) -> Vec<Arc<FavouriteModIdentifier>> {
    match sort_type {
        SortType::Name => {
            merge_sort_by(favourites, |a, b| directed(compare_names(&a.name, &b.name), direction))
        }
        SortType::Random => shuffled(favourites),
        _ => favourites.to_vec(),
    }
}

/// Sorts the organized game-version list.
///
/// The two count sorts always read the aggregate cache; they never scan the
/// mod collection themselves.
pub fn sort_game_versions(
    game_versions: &[Arc<GameVersion>],
    sort_type: SortType,
    direction: SortDirection,
    counts: &GameVersionCounts,
) -> Vec<Arc<GameVersion>> {
    match sort_type {
        SortType::Name => {
            merge_sort_by(game_versions, |a, b| directed(compare_names(&a.name, &b.name), direction))
        }
        SortType::NumberOfSupportedMods => merge_sort_by(game_versions, |a, b| {
            compare_counts(
                counts.supported_mod_count(&a.id),
                counts.supported_mod_count(&b.id),
                &a.name,
                &b.name,
                direction,
            )
        }),
        SortType::NumberOfCompatibleMods => merge_sort_by(game_versions, |a, b| {
            compare_counts(
                counts.compatible_mod_count(&a.id),
                counts.compatible_mod_count(&b.id),
                &a.name,
                &b.name,
                direction,
            )
        }),
        SortType::Random => shuffled(game_versions),
        _ => game_versions.to_vec(),
    }
}

/// Sorts a team or author roster.
pub fn sort_authors(
    authors: &[Arc<AuthorInfo>],
    sort_type: SortType,
    direction: SortDirection,
) -> Vec<Arc<AuthorInfo>> {
    match sort_type {
        SortType::Name => {
            merge_sort_by(authors, |a, b| directed(compare_names(&a.name, &b.name), direction))
        }
        SortType::NumberOfMods => merge_sort_by(authors, |a, b| {
            compare_counts(a.mod_count, b.mod_count, &a.name, &b.name, direction)
        }),
        SortType::Random => shuffled(authors),
        _ => authors.to_vec(),
    }
}
