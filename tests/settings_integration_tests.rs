//! Integration tests for settings persistence
//!
//! These tests run the full loop: organizer state captured as settings,
//! written to disk through the ConfigManager, read back and re-applied.

use camino::Utf8PathBuf;
use modbrowser::{
    ConfigManager, FilterType, GameMod, ModCollection, ModVersion, ModVersionType,
    OrganizerManager, OrganizerSettings, SortDirection, SortType,
};
use std::sync::{Arc, RwLock};
use tempfile::TempDir;

fn downloaded_mod(id: &str, name: &str) -> GameMod {
    let mut game_mod = GameMod::new(id, name);
    let mut version = ModVersion::new(Some("1.0"), None);
    version.version_types = vec![ModVersionType::new(None, true)];
    game_mod.versions.push(version);
    game_mod
}

fn config_manager() -> (ConfigManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let manager = ConfigManager::new(&config_path).unwrap();
    (manager, temp_dir)
}

#[test]
fn test_settings_survive_save_and_restore() {
    let (config, _temp_dir) = config_manager();

    let mut mods = ModCollection::new();
    mods.add_mod(downloaded_mod("m1", "Alpha"));
    let organizer =
        OrganizerManager::with_collections(Some(Arc::new(RwLock::new(mods.clone()))), None, None);

    assert!(organizer.set_sort_options(SortType::Name, SortDirection::Descending));
    assert!(organizer.set_filter_type(FilterType::Downloaded));
    config.save_settings(&organizer.settings()).unwrap();

    // A fresh session picks up where the last one left off.
    let restored = OrganizerManager::with_collections(Some(Arc::new(RwLock::new(mods))), None, None);
    let loaded = config.load_settings().unwrap();
    assert!(restored.apply_settings(&loaded));

    assert_eq!(restored.filter_type(), FilterType::Downloaded);
    assert_eq!(restored.sort_type(), SortType::Name);
    assert_eq!(restored.sort_direction(), SortDirection::Descending);
    assert_eq!(restored.organized_mods().len(), 1);
}

#[test]
fn test_settings_file_is_human_readable_yaml() {
    let (config, _temp_dir) = config_manager();

    let settings = OrganizerSettings {
        filter_type: FilterType::SupportedGameVersions,
        sort_type: SortType::NumberOfSupportedMods,
        sort_direction: SortDirection::Descending,
    };
    config.save_settings(&settings).unwrap();

    let contents = std::fs::read_to_string(config.settings_path()).unwrap();
    assert!(contents.contains("Filter Type: Supported Game Versions"));
    assert!(contents.contains("Sort Type: Number of Supported Mods"));
    assert!(contents.contains("Sort Direction: Descending"));
}

#[test]
fn test_tampered_settings_fall_back_without_breaking_startup() {
    let (config, _temp_dir) = config_manager();

    // A combination no session could have produced.
    std::fs::write(
        config.settings_path(),
        "Filter Type: Downloaded\nSort Type: Number of Mods\nSort Direction: Ascending\n",
    )
    .unwrap();

    let loaded = config.load_settings().unwrap();
    assert_eq!(loaded, OrganizerSettings::default());

    let organizer = OrganizerManager::new();
    assert!(organizer.apply_settings(&loaded));
}
