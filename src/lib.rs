// ModBrowser - Organizing engine for browsing game mod catalogues
//
// This is the library crate containing the organizing engine: entity
// collections, the filter/sort/aggregate services and the state manager
// that derives the organized views and broadcasts change events. A GUI
// front end is expected to sit on top of it.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::collections::{FavouriteModCollection, GameVersionCollection, ModCollection};
pub use models::entities::{
    AuthorInfo, AuthorType, FavouriteModIdentifier, GameMod, GameVersion, ModVersion,
    ModVersionType,
};
pub use models::options::{FilterType, SortDirection, SortType};
pub use models::settings::{OrganizerSettings, SettingsError};
pub use state::{CollectionChange, OrganizerChange, OrganizerManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
