use crate::models::options::{FilterType, SortDirection, SortType};
use crate::services::validity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted organizer preferences, loaded from `Organizer Settings.yaml`.
///
/// Only the view options are persisted; selections are transient and always
/// start empty, so validation happens against the no-selection context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerSettings {
    #[serde(rename = "Filter Type", default)]
    pub filter_type: FilterType,

    #[serde(rename = "Sort Type", default)]
    pub sort_type: SortType,

    #[serde(rename = "Sort Direction", default)]
    pub sort_direction: SortDirection,
}

impl Default for OrganizerSettings {
    fn default() -> Self {
        Self {
            filter_type: FilterType::None,
            sort_type: SortType::Unsorted,
            sort_direction: SortDirection::Ascending,
        }
    }
}

/// Errors produced when validating persisted settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("sort type {sort_type} is not valid under filter {filter_type}")]
    InvalidCombination {
        sort_type: SortType,
        filter_type: FilterType,
    },
}

impl OrganizerSettings {
    /// Checks the persisted combination against the validity matrix.
    ///
    /// Settings are applied before any selection exists, so all selection
    /// flags are false here.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if validity::is_valid_sort_type(self.sort_type, self.filter_type, false, false, false) {
            Ok(())
        } else {
            Err(SettingsError::InvalidCombination {
                sort_type: self.sort_type,
                filter_type: self.filter_type,
            })
        }
    }
}
