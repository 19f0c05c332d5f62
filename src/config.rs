use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub(crate) const CONFIG_DIR_NAME: &str = "reposcout";
pub(crate) const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_DATE_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]";
const DEFAULT_PATH_COLUMN_WIDTH: usize = 40;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to resolve the user configuration directory.")]
    MissingConfigDirectory,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// A tracked folder as persisted in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub path: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalApplication {
    pub name: String,
    pub command: String,
    pub argument: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub repositories: Vec<FolderEntry>,
    #[serde(default)]
    pub external_applications: Vec<ExternalApplication>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_path_column_width")]
    pub path_column_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repositories: Vec::new(),
            external_applications: Vec::new(),
            date_format: default_date_format(),
            path_column_width: default_path_column_width(),
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_path_column_width() -> usize {
    DEFAULT_PATH_COLUMN_WIDTH
}

impl Config {
    /// The configuration file under the user's configuration directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::MissingConfigDirectory)?;
        Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.display().to_string(),
            source: error,
        })?;
        serde_json::from_str(&raw).map_err(|error| ConfigError::Parse {
            path: path.display().to_string(),
            source: error,
        })
    }

    /// Loads the configuration, seeding an empty one on first run.
    pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
        if !path.is_file() {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        Config::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| ConfigError::Write {
                path: parent.display().to_string(),
                source: error,
            })?;
        }

        let rendered =
            serde_json::to_string_pretty(self).expect("configuration serializes to JSON");
        fs::write(path, rendered).map_err(|error| ConfigError::Write {
            path: path.display().to_string(),
            source: error,
        })
    }

    pub fn clear_repositories(&mut self) {
        self.repositories.clear();
    }

    pub fn add_repository(&mut self, path: &str, image_path: &str, is_favorite: bool) {
        self.repositories.push(FolderEntry {
            path: path.to_string(),
            image_path: image_path.to_string(),
            is_favorite,
        });
    }

    /// Removes the first entry matching `path` (whitespace-insensitive).
    /// A path that is not tracked is left alone.
    pub fn remove_repository(&mut self, path: &str) {
        let trimmed = path.trim();
        if let Some(index) = self
            .repositories
            .iter()
            .position(|entry| entry.path.trim() == trimmed)
        {
            self.repositories.remove(index);
        }
    }

    pub fn clear_external_applications(&mut self) {
        self.external_applications.clear();
    }

    pub fn add_external_application(&mut self, name: &str, command: &str, argument: &str) {
        self.external_applications.push(ExternalApplication {
            name: name.to_string(),
            command: command.to_string(),
            argument: argument.to_string(),
        });
    }

    pub fn remove_external_application(&mut self, name: &str) {
        if let Some(index) = self
            .external_applications
            .iter()
            .position(|application| application.name == name)
        {
            self.external_applications.remove(index);
        }
    }

    pub fn external_application_by_name(&self, name: &str) -> Option<&ExternalApplication> {
        self.external_applications
            .iter()
            .find(|application| application.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        let mut config = Config::default();
        config.add_repository("/home/user/code/alpha", "alpha.png", true);
        config.add_repository("/home/user/code/beta", "", false);
        config.add_external_application("Files", "nautilus", "%PATH%");
        config
    }

    #[test]
    fn saves_and_reloads_the_same_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = sample_config();
        config.save(&path).unwrap();
        let reloaded = Config::load(&path).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn load_or_create_seeds_an_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_or_create(&path).unwrap();

        assert!(path.is_file());
        assert!(config.repositories.is_empty());
        assert_eq!(config.path_column_width, 40);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = serde_json::from_str::<Config>("{}").unwrap();
        assert_eq!(config.date_format, "[year]-[month]-[day] [hour]:[minute]");
        assert_eq!(config.path_column_width, 40);
    }

    #[test]
    fn removes_only_the_first_matching_repository() {
        let mut config = sample_config();
        config.add_repository(" /home/user/code/alpha ", "", false);

        config.remove_repository("/home/user/code/alpha");

        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.repositories[1].path, " /home/user/code/alpha ");
    }

    #[test]
    fn removing_an_unknown_repository_is_a_no_op() {
        let mut config = sample_config();
        config.remove_repository("/nowhere");
        assert_eq!(config.repositories.len(), 2);
    }

    #[test]
    fn finds_external_applications_by_name() {
        let config = sample_config();
        assert_eq!(
            config.external_application_by_name("Files").map(|a| a.command.as_str()),
            Some("nautilus")
        );
        assert!(config.external_application_by_name("Terminal").is_none());
    }
}
