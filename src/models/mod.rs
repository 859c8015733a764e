//! Data models for the organizer engine.
//!
//! This module contains the core data structures the engine operates on:
//! - Entity snapshots ([`GameMod`], [`GameVersion`], [`FavouriteModIdentifier`],
//!   [`AuthorInfo`]): read-only references into the upstream datasets
//! - Upstream stores ([`ModCollection`], [`FavouriteModCollection`],
//!   [`GameVersionCollection`]): enumerable collections owned elsewhere and
//!   shared with the engine behind `Arc<RwLock<>>`
//! - View options ([`FilterType`], [`SortType`], [`SortDirection`])
//! - Persisted preferences ([`OrganizerSettings`]) with YAML serialization
//!
//! The engine never mutates entities or upstream stores; it only builds
//! filtered, sorted projections over them.

pub mod collections;
pub mod entities;
pub mod options;
pub mod settings;

pub use collections::{FavouriteModCollection, GameVersionCollection, ModCollection};
pub use entities::{
    AuthorInfo, AuthorType, FavouriteModIdentifier, GameMod, GameVersion, ModVersion,
    ModVersionType,
};
pub use options::{FilterType, SortDirection, SortType};
pub use settings::{OrganizerSettings, SettingsError};
