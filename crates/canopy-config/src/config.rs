//! Configuration sections and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub templates: TemplatesConfig,
    pub rules: RulesConfig,
    pub debug: DebugConfig,
}

/// World and placement parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for every random draw.
    pub seed: u64,
    /// Absolute height of the water line.
    pub sea_level: i32,
    pub min_y: i32,
    pub max_y: i32,
    /// Number of placements the demo attempts.
    pub attempts: u32,
}

/// Template library location and placement defaults.
///
/// The placement flags apply to manifest entries that carry no `config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding the manifest and structure files. `None` disables templates.
    pub directory: Option<PathBuf>,
    /// Manifest file name inside `directory`.
    pub manifest: String,
    pub paste_air: bool,
    pub replace_solid: bool,
    pub base_depth: u32,
}

/// Decoration rule source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// JSON rule file. `None` uses the built-in rules.
    pub path: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g. "debug", "info,canopy_template=trace").
    pub log_level: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: 63,
            min_y: 0,
            max_y: 255,
            attempts: 8,
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            directory: None,
            manifest: "templates.ron".to_string(),
            paste_air: false,
            replace_solid: false,
            base_depth: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Loads `config.ron` from `config_dir`, writing a default file first if
    /// none exists.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Saves to `config_dir/config.ron`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let write_err = |source| ConfigError::Write {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(write_err)?;
        Ok(())
    }

    /// Re-reads the file; returns `Some(new_config)` only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new()).unwrap();
        assert!(ron_str.contains("sea_level: 63"));
        assert!(ron_str.contains("manifest: \"templates.ron\""));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(generation: (seed: 7))").unwrap();
        assert_eq!(config.generation.seed, 7);
        assert_eq!(config.generation.attempts, 8, "unset fields keep their defaults");
        assert_eq!(config.templates, TemplatesConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(biomes: [\"forest\"])");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.generation.seed = 1234;
        config.templates.directory = Some(PathBuf::from("structures"));
        config.templates.base_depth = 6;
        config.rules.path = Some(PathBuf::from("rules.json"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(&dir.path().join("nested")).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("nested").join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none(), "unchanged file reloads as None");

        let mut modified = config.clone();
        modified.generation.attempts = 32;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.generation.attempts), Some(32));
    }

    #[test]
    fn test_invalid_ron_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE), "error should name the file: {err}");
    }
}
