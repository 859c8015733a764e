use crate::models::settings::OrganizerSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration manager for loading and saving the organizer settings file.
///
/// Manages a single YAML file (`Organizer Settings.yaml`) holding the
/// persisted view options: filter type, sort type and sort direction.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Browser Data")
    ///
    /// # Returns
    /// A new ConfigManager instance
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("Organizer Settings.yaml"),
            config_dir,
        })
    }

    /// Load the organizer settings file.
    ///
    /// A missing file is not an error: first launch gets the defaults. A
    /// file that parses but holds an invalid filter/sort combination is
    /// also replaced with the defaults, so a hand-edited file can never
    /// start the engine in a state it could not have reached itself.
    pub fn load_settings(&self) -> Result<OrganizerSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(OrganizerSettings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: OrganizerSettings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        if let Err(error) = settings.validate() {
            tracing::warn!(
                "Settings file {} holds an invalid combination ({}), using defaults",
                self.settings_path,
                error
            );
            return Ok(OrganizerSettings::default());
        }

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the organizer settings file.
    ///
    /// # Arguments
    /// * `settings` - The OrganizerSettings to save
    pub fn save_settings(&self, settings: &OrganizerSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
