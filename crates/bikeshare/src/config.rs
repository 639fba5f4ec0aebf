//! Data source configuration.
//!
//! Maps each [`City`] to the CSV file holding its trips. The mapping is an
//! explicit value handed to the loader, built from defaults, an optional YAML
//! file, and directory overrides.

use crate::domain::City;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory holding the city files
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Where each city's trip file lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataConfig {
    /// Directory that relative city paths are resolved against
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// City to file mapping
    pub cities: BTreeMap<City, PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl DataConfig {
    /// Conventional file names under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let cities = City::ALL
            .into_iter()
            .map(|city| (city, PathBuf::from(city.default_file_name())))
            .collect();

        Self {
            data_dir: data_dir.into(),
            cities,
        }
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            data_dir = %config.data_dir.display(),
            cities = config.cities.len(),
            "Loaded data configuration"
        );
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Replace the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Apply the `BIKESHARE_DATA_DIR` override if it is set and non-empty.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => {
                tracing::debug!(env_var = DATA_DIR_ENV, value = %dir, "Overriding data directory");
                self.with_data_dir(dir.trim())
            }
            _ => self,
        }
    }

    /// Resolve the file for `city`.
    ///
    /// Absolute paths are returned unchanged; relative ones are joined onto
    /// the data directory.
    pub fn path_for(&self, city: City) -> Result<PathBuf> {
        let file = self.cities.get(&city).ok_or_else(|| {
            Error::Config(format!("No data file configured for '{}'", city.key()))
        })?;

        if file.is_absolute() {
            Ok(file.clone())
        } else {
            Ok(self.data_dir.join(file))
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
