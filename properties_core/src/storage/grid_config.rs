// properties_core/src/storage/grid_config.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use crate::constants::GRID_CONFIG_RON;
use crate::error::Result;
use crate::schema::value::BooleanEncoding;
use crate::{status_debug, status_error, status_warn};

pub static GRID_CONFIG: Lazy<RwLock<GridConfig>> = Lazy::new(|| RwLock::new(load_config()));

/// Settings applied when building property grid schemas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// How booleans edited in the grid are written back.
    pub boolean_encoding: BooleanEncoding,
    /// Derive "Max Speed" from `maxSpeed` when a property has no label.
    /// When off, the raw name is shown.
    pub derive_labels: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            boolean_encoding: BooleanEncoding::Legacy,
            derive_labels: true,
        }
    }
}

/// Returns a copy of the in memory config. Falls back to the default
/// if the lock is poisoned.
pub fn current_config() -> GridConfig {
    match GRID_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(e) => {
            status_error!("Could not read grid config: {e}.");
            GridConfig::default()
        }
    }
}

/// Replaces the in memory config.
pub fn set_config(config: GridConfig) {
    match GRID_CONFIG.write() {
        Ok(mut current) => {
            status_debug!(
                "Grid config updated: {:?} booleans, derived labels {}.",
                config.boolean_encoding,
                if config.derive_labels { "on" } else { "off" }
            );
            *current = config;
        }
        Err(e) => status_error!("Could not update grid config: {e}."),
    }
}

/// Saves the in memory config to the app config directory.
pub fn save_config() -> Result<()> {
    let path = config_path().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "could not resolve app directory")
    })?;
    save_config_to(&path, &current_config())
}

pub fn save_config_to(path: &Path, config: &GridConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let ron = to_string_pretty(config, PrettyConfig::default())?;
    fs::write(path, ron)?;
    Ok(())
}

/// Reads a config file. Missing keys take their default value.
pub fn load_config_from(path: &Path) -> Result<GridConfig> {
    let text = fs::read_to_string(path)?;
    Ok(ron::from_str(&text)?)
}

/// Returns the app_dir for the program, if the platform has one.
pub fn app_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "property-grid", "properties")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

fn config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(GRID_CONFIG_RON))
}

fn load_config() -> GridConfig {
    let Some(path) = config_path() else {
        status_error!("Could not resolve app directory.");
        return GridConfig::default();
    };

    if !path.exists() {
        return GridConfig::default();
    }

    match load_config_from(&path) {
        Ok(config) => config,
        Err(e) => {
            status_warn!("Error loading grid config: {e}.");
            GridConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_legacy_booleans() {
        let config = GridConfig::default();
        assert_eq!(config.boolean_encoding, BooleanEncoding::Legacy);
        assert!(config.derive_labels);
    }

    #[test]
    fn in_memory_config_can_be_replaced() {
        let _status = crate::logging::logging::STATUS_TEST_LOCK.lock();
        let previous = current_config();
        let literal = GridConfig {
            boolean_encoding: BooleanEncoding::Literal,
            derive_labels: false,
        };

        set_config(literal.clone());
        assert_eq!(current_config(), literal);
        assert_eq!(
            crate::logging::logging::last_status(),
            "Grid config updated: Literal booleans, derived labels off."
        );
        set_config(previous);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join(GRID_CONFIG_RON);
        let config = GridConfig {
            boolean_encoding: BooleanEncoding::Literal,
            derive_labels: false,
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(GRID_CONFIG_RON);
        fs::write(&path, "(derive_labels: false)").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.boolean_encoding, BooleanEncoding::Legacy);
        assert!(!config.derive_labels);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(GRID_CONFIG_RON);
        fs::write(&path, "(boolean_encoding: Sometimes)").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(crate::error::PropertyError::RonParse(_))
        ));
    }
}
