use chrono::NaiveDate;

/// A single distributable build of a mod version (e.g. regular vs. add-on pack).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModVersionType {
    /// Type label, `None` for the default build.
    pub version_type: Option<String>,

    /// Whether the corresponding file is present locally.
    pub downloaded: bool,
}

impl ModVersionType {
    pub fn new(version_type: Option<&str>, downloaded: bool) -> Self {
        Self {
            version_type: version_type.map(str::to_string),
            downloaded,
        }
    }
}

/// One released version of a mod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModVersion {
    /// Version label, `None` for unversioned single-release mods.
    pub version: Option<String>,

    /// Release date when known; older catalogue entries often lack one.
    pub release_date: Option<NaiveDate>,

    /// Ids of the game versions this release declares support for.
    pub supported_game_version_ids: Vec<String>,

    /// The builds this version ships as. Never empty in well-formed metadata.
    pub version_types: Vec<ModVersionType>,
}

impl ModVersion {
    pub fn new(version: Option<&str>, release_date: Option<NaiveDate>) -> Self {
        Self {
            version: version.map(str::to_string),
            release_date,
            supported_game_version_ids: Vec::new(),
            version_types: vec![ModVersionType::new(None, false)],
        }
    }
}

/// A moddable content package as published in the catalogue.
///
/// Read-only from the engine's perspective: the organizer only ever
/// reorders and filters views over these snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMod {
    pub id: String,
    pub name: String,

    /// Publishing team name, if the mod is team-released.
    pub team: Option<String>,

    /// Individual author names credited in the metadata.
    pub authors: Vec<String>,

    pub versions: Vec<ModVersion>,
}

impl GameMod {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            team: None,
            authors: Vec::new(),
            versions: Vec::new(),
        }
    }

    /// Earliest release date across all versions, `None` if no version has one.
    pub fn initial_release_date(&self) -> Option<NaiveDate> {
        self.versions.iter().filter_map(|v| v.release_date).min()
    }

    /// Latest release date across all versions, `None` if no version has one.
    pub fn latest_release_date(&self) -> Option<NaiveDate> {
        self.versions.iter().filter_map(|v| v.release_date).max()
    }

    pub fn number_of_versions(&self) -> usize {
        self.versions.len()
    }

    pub fn number_of_version_types(&self) -> usize {
        self.versions.iter().map(|v| v.version_types.len()).sum()
    }

    /// Union of supported game-version ids over all versions, first-seen order.
    pub fn supported_game_version_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for version in &self.versions {
            for id in &version.supported_game_version_ids {
                if !ids.iter().any(|existing| existing == id) {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }

    pub fn supports_game_version(&self, game_version_id: &str) -> bool {
        self.versions
            .iter()
            .any(|v| v.supported_game_version_ids.iter().any(|id| id == game_version_id))
    }

    /// Whether at least one version file is present locally.
    pub fn is_downloaded(&self) -> bool {
        self.versions
            .iter()
            .any(|v| v.version_types.iter().any(|t| t.downloaded))
    }

    /// A stand-alone mod declares no game-version dependency at all.
    pub fn is_stand_alone(&self) -> bool {
        self.versions.iter().all(|v| v.supported_game_version_ids.is_empty())
    }

    /// Whether this mod is the one a favourite identifier pins.
    ///
    /// Matching is by case-insensitive name; the identifier's version and
    /// version type narrow the pin but still point at this mod.
    pub fn matches_favourite(&self, favourite: &FavouriteModIdentifier) -> bool {
        self.name.eq_ignore_ascii_case(&favourite.name)
    }

    /// Whether the mod is credited to the given team, case-insensitively.
    pub fn has_team(&self, team_name: &str) -> bool {
        self.team
            .as_ref()
            .is_some_and(|team| team.eq_ignore_ascii_case(team_name))
    }

    /// Whether the mod credits the given individual author, case-insensitively.
    pub fn has_author(&self, author_name: &str) -> bool {
        self.authors.iter().any(|a| a.eq_ignore_ascii_case(author_name))
    }
}

/// A playable game configuration mods may target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameVersion {
    pub id: String,
    pub name: String,

    /// Whether the installation has been configured by the user.
    pub configured: bool,

    /// Ids of other game versions whose content this one can run.
    /// This is the compatibility graph: a mod supporting any of these ids
    /// is compatible with this game version even without direct support.
    pub compatible_game_versions: Vec<String>,
}

impl GameVersion {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            configured: false,
            compatible_game_versions: Vec::new(),
        }
    }

    /// Whether the given mod can run on this game version.
    ///
    /// True when some mod version supports this id directly, or supports
    /// any id this game version declares compatibility with.
    pub fn is_compatible_with_mod(&self, game_mod: &GameMod) -> bool {
        if game_mod.supports_game_version(&self.id) {
            return true;
        }
        self.compatible_game_versions
            .iter()
            .any(|id| game_mod.supports_game_version(id))
    }
}

/// A user-pinned (mod, version, version type) triple.
///
/// Independent of whether the mod is currently installed; dangling
/// favourites simply never match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteModIdentifier {
    pub name: String,
    pub version: Option<String>,
    pub version_type: Option<String>,
}

impl FavouriteModIdentifier {
    pub fn new(name: &str, version: Option<&str>, version_type: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            version: version.map(str::to_string),
            version_type: version_type.map(str::to_string),
        }
    }

    /// Full-triple identity comparison, name case-insensitive.
    pub fn matches(&self, name: &str, version: Option<&str>, version_type: Option<&str>) -> bool {
        self.name.eq_ignore_ascii_case(name)
            && self.version.as_deref() == version
            && self.version_type.as_deref() == version_type
    }
}

/// Whether an [`AuthorInfo`] entry names a team or an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorType {
    Team,
    Individual,
}

/// Aggregated identity derived from mod authorship metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: String,
    pub author_type: AuthorType,

    /// Running count of mods attributed to this identity.
    pub mod_count: usize,
}

impl AuthorInfo {
    pub fn new(name: &str, author_type: AuthorType) -> Self {
        Self {
            name: name.to_string(),
            author_type,
            mod_count: 0,
        }
    }

    pub fn increment_mod_count(&mut self) {
        self.mod_count += 1;
    }
}
