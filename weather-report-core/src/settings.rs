use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::project_dirs, model::Location};

const SETTINGS_FILE_NAME: &str = "WeatherReportSettings.json";

/// Per-user choices that survive between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub selected_country: Option<String>,
    pub selected_city: Option<String>,
}

impl UserSettings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_file_path()?)
    }

    /// Missing file means nothing has been selected yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))
    }

    pub fn settings_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join(SETTINGS_FILE_NAME))
    }

    /// The saved location, once both country and city are chosen.
    pub fn selected_location(&self) -> Option<Location> {
        match (&self.selected_country, &self.selected_city) {
            (Some(country), Some(city)) => Some(Location::new(country.as_str(), city.as_str())),
            _ => None,
        }
    }

    pub fn select(&mut self, location: &Location) {
        self.selected_country = Some(location.country.clone());
        self.selected_city = Some(location.city.clone());
    }
}
