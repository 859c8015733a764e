//! Property tests for the stable merge sort and the mod comparators.

use chrono::{Days, NaiveDate};
use modbrowser::services::sort::{merge_sort_by, sort_mods};
use modbrowser::{GameMod, ModVersion, SortDirection, SortType};
use proptest::prelude::*;
use std::sync::Arc;

fn dated_mod(index: usize, day_offset: Option<u16>) -> Arc<GameMod> {
    let mut game_mod = GameMod::new(&format!("m{index}"), &format!("Mod {index:04}"));
    let date = day_offset
        .map(|offset| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset as u64));
    game_mod.versions.push(ModVersion::new(Some("1.0"), date));
    Arc::new(game_mod)
}

proptest! {
    #[test]
    fn merge_sort_matches_standard_stable_sort(
        keys in proptest::collection::vec(0u8..16, 0..64)
    ) {
        let items: Vec<(u8, usize)> = keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
        let sorted = merge_sort_by(&items, |a, b| a.0.cmp(&b.0));
        let mut expected = items.clone();
        expected.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn merge_sort_keeps_equal_keys_in_input_order(
        keys in proptest::collection::vec(0u8..4, 0..64)
    ) {
        let items: Vec<(u8, usize)> = keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
        let sorted = merge_sort_by(&items, |a, b| a.0.cmp(&b.0));
        for window in sorted.windows(2) {
            if window[0].0 == window[1].0 {
                prop_assert!(window[0].1 < window[1].1);
            }
        }
    }

    #[test]
    fn name_sort_reverses_cleanly_with_distinct_names(len in 0usize..32) {
        let mods: Vec<Arc<GameMod>> = (0..len).map(|i| dated_mod(i, None)).collect();
        let ascending = sort_mods(&mods, SortType::Name, SortDirection::Ascending);
        let mut descending = sort_mods(&mods, SortType::Name, SortDirection::Descending);
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn undated_mods_sort_last_in_both_directions(
        offsets in proptest::collection::vec(proptest::option::of(0u16..1000), 0..48)
    ) {
        let mods: Vec<Arc<GameMod>> = offsets
            .iter()
            .enumerate()
            .map(|(index, offset)| dated_mod(index, *offset))
            .collect();

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_mods(&mods, SortType::LatestReleaseDate, direction);
            prop_assert_eq!(sorted.len(), mods.len());

            if let Some(first_undated) =
                sorted.iter().position(|m| m.latest_release_date().is_none())
            {
                prop_assert!(
                    sorted[first_undated..].iter().all(|m| m.latest_release_date().is_none())
                );
            }

            let dated: Vec<NaiveDate> =
                sorted.iter().filter_map(|m| m.latest_release_date()).collect();
            match direction {
                SortDirection::Ascending => {
                    prop_assert!(dated.windows(2).all(|w| w[0] <= w[1]))
                }
                SortDirection::Descending => {
                    prop_assert!(dated.windows(2).all(|w| w[0] >= w[1]))
                }
            }
        }
    }

    #[test]
    fn unsorted_preserves_catalogue_order(len in 0usize..32) {
        let mods: Vec<Arc<GameMod>> = (0..len).map(|i| dated_mod(i, Some(i as u16))).collect();
        let sorted = sort_mods(&mods, SortType::Unsorted, SortDirection::Descending);
        prop_assert_eq!(sorted, mods);
    }
}
