use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mutually-exclusive filter applied to the mod list.
///
/// `Teams` and `Authors` are browsing-mode switches rather than mod
/// predicates: under them the meaningful organized list is the team or
/// author roster until one is selected, after which the mod list shows
/// that team's or author's mods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    None,
    Favourites,
    Downloaded,
    #[serde(rename = "Supported Game Versions")]
    SupportedGameVersions,
    #[serde(rename = "Compatible Game Versions")]
    CompatibleGameVersions,
    #[serde(rename = "Stand-Alone")]
    StandAlone,
    Teams,
    Authors,
}

impl FilterType {
    /// All filter types in declaration order.
    pub const ALL: [FilterType; 8] = [
        FilterType::None,
        FilterType::Favourites,
        FilterType::Downloaded,
        FilterType::SupportedGameVersions,
        FilterType::CompatibleGameVersions,
        FilterType::StandAlone,
        FilterType::Teams,
        FilterType::Authors,
    ];
}

impl Default for FilterType {
    fn default() -> Self {
        FilterType::None
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterType::None => "None",
            FilterType::Favourites => "Favourites",
            FilterType::Downloaded => "Downloaded",
            FilterType::SupportedGameVersions => "Supported Game Versions",
            FilterType::CompatibleGameVersions => "Compatible Game Versions",
            FilterType::StandAlone => "Stand-Alone",
            FilterType::Teams => "Teams",
            FilterType::Authors => "Authors",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "none" => Ok(FilterType::None),
            "favourites" | "favorites" => Ok(FilterType::Favourites),
            "downloaded" => Ok(FilterType::Downloaded),
            "supported game versions" => Ok(FilterType::SupportedGameVersions),
            "compatible game versions" => Ok(FilterType::CompatibleGameVersions),
            "stand-alone" | "standalone" => Ok(FilterType::StandAlone),
            "teams" => Ok(FilterType::Teams),
            "authors" => Ok(FilterType::Authors),
            other => Err(format!("Unknown filter type: {}", other)),
        }
    }
}

/// Sort order applied to the organized lists.
///
/// Declaration order matters: the deterministic fallback when a sort type
/// becomes invalid is the first valid entry in this order, and UI sort
/// pickers are populated in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortType {
    Unsorted,
    Name,
    #[serde(rename = "Initial Release Date")]
    InitialReleaseDate,
    #[serde(rename = "Latest Release Date")]
    LatestReleaseDate,
    #[serde(rename = "Number of Mods")]
    NumberOfMods,
    #[serde(rename = "Number of Versions")]
    NumberOfVersions,
    #[serde(rename = "Number of Supported Mods")]
    NumberOfSupportedMods,
    #[serde(rename = "Number of Compatible Mods")]
    NumberOfCompatibleMods,
    Random,
}

impl SortType {
    /// All sort types in declaration order.
    pub const ALL: [SortType; 9] = [
        SortType::Unsorted,
        SortType::Name,
        SortType::InitialReleaseDate,
        SortType::LatestReleaseDate,
        SortType::NumberOfMods,
        SortType::NumberOfVersions,
        SortType::NumberOfSupportedMods,
        SortType::NumberOfCompatibleMods,
        SortType::Random,
    ];
}

impl Default for SortType {
    fn default() -> Self {
        SortType::Unsorted
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortType::Unsorted => "Unsorted",
            SortType::Name => "Name",
            SortType::InitialReleaseDate => "Initial Release Date",
            SortType::LatestReleaseDate => "Latest Release Date",
            SortType::NumberOfMods => "Number of Mods",
            SortType::NumberOfVersions => "Number of Versions",
            SortType::NumberOfSupportedMods => "Number of Supported Mods",
            SortType::NumberOfCompatibleMods => "Number of Compatible Mods",
            SortType::Random => "Random",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SortType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "unsorted" => Ok(SortType::Unsorted),
            "name" => Ok(SortType::Name),
            "initial release date" => Ok(SortType::InitialReleaseDate),
            "latest release date" => Ok(SortType::LatestReleaseDate),
            "number of mods" => Ok(SortType::NumberOfMods),
            "number of versions" => Ok(SortType::NumberOfVersions),
            "number of supported mods" => Ok(SortType::NumberOfSupportedMods),
            "number of compatible mods" => Ok(SortType::NumberOfCompatibleMods),
            "random" => Ok(SortType::Random),
            other => Err(format!("Unknown sort type: {}", other)),
        }
    }
}

/// Direction of the active sort.
///
/// Ignored by [`SortType::Unsorted`] and [`SortType::Random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ascending" => Ok(SortDirection::Ascending),
            "descending" => Ok(SortDirection::Descending),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_round_trip() {
        for filter_type in FilterType::ALL {
            let parsed: FilterType = filter_type.to_string().parse().unwrap();
            assert_eq!(parsed, filter_type);
        }
    }

    #[test]
    fn test_sort_type_round_trip() {
        for sort_type in SortType::ALL {
            let parsed: SortType = sort_type.to_string().parse().unwrap();
            assert_eq!(parsed, sort_type);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("FAVORITES".parse::<FilterType>().unwrap(), FilterType::Favourites);
        assert_eq!("random".parse::<SortType>().unwrap(), SortType::Random);
        assert_eq!("Descending".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!("frobnicated".parse::<FilterType>().is_err());
        assert!("".parse::<SortType>().is_err());
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_serialized_names_match_display() {
        // Persisted files carry the same names users see in the UI.
        for filter_type in FilterType::ALL {
            let yaml = serde_yaml_ng::to_string(&filter_type).unwrap();
            assert_eq!(yaml.trim(), filter_type.to_string());
        }
        for sort_type in SortType::ALL {
            let yaml = serde_yaml_ng::to_string(&sort_type).unwrap();
            assert_eq!(yaml.trim(), sort_type.to_string());
        }
    }

    #[test]
    fn test_unsorted_is_first_sort_type() {
        // The deterministic fallback relies on Unsorted leading the declaration order.
        assert_eq!(SortType::ALL[0], SortType::Unsorted);
    }
}
