//! User configuration
//!
//! Read from `<config_dir>/flashdrill/config.toml`. Every field is optional:
//! ```toml
//! namespace = "german"
//! word_list = "/home/me/decks/german.json"
//! history_aware = true
//! hard_offset = 10
//! dedupe_hard = true
//! drain_hard_queue = false
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::scheduler::{SchedulerOptions, DEFAULT_HARD_OFFSET};
use crate::storage::{FileStore, StorageError};
use crate::wordlist::WordSource;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid namespace: {0:?}")]
    InvalidNamespace(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root for persisted sessions (default: platform data dir)
    pub data_dir: Option<PathBuf>,
    /// One session per namespace
    pub namespace: String,
    /// Word list path or http(s) URL
    pub word_list: Option<String>,
    /// Skip cards shown in earlier sessions
    pub history_aware: bool,
    pub hard_offset: u64,
    pub dedupe_hard: bool,
    pub drain_hard_queue: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: "default".to_string(),
            word_list: None,
            history_aware: true,
            hard_offset: DEFAULT_HARD_OFFSET,
            dedupe_hard: true,
            drain_hard_queue: false,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("flashdrill").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                log::debug!("Loading config from {:?}", path);
                Ok(toml::from_str(&content)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            hard_offset: self.hard_offset,
            dedupe_hard: self.dedupe_hard,
            drain_hard_queue: self.drain_hard_queue,
        }
    }

    pub fn word_source(&self) -> Option<WordSource> {
        self.word_list.as_deref().and_then(|s| s.parse().ok())
    }

    /// Directory holding this namespace's session and history
    pub fn session_dir(&self) -> Result<PathBuf> {
        validate_namespace(&self.namespace)?;
        let base = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => FileStore::default_data_dir()?,
        };
        Ok(base.join(&self.namespace))
    }
}

/// A namespace is a single plain directory name under the data dir
fn validate_namespace(namespace: &str) -> Result<()> {
    let plain = !namespace.is_empty()
        && namespace != "."
        && namespace != ".."
        && !namespace.contains(['/', '\\'])
        && Path::new(namespace).is_relative();
    if plain {
        Ok(())
    } else {
        Err(ConfigError::InvalidNamespace(namespace.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scheduler_options(), SchedulerOptions::default());
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "namespace = \"german\"\nhistory_aware = false\nhard_offset = 3\nword_list = \"https://example.org/de.json\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.namespace, "german");
        assert!(!config.history_aware);
        assert_eq!(config.hard_offset, 3);
        assert!(config.dedupe_hard);
        assert_eq!(
            config.word_source(),
            Some(WordSource::Url("https://example.org/de.json".to_string()))
        );
    }

    #[test]
    fn test_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "hard_offset = \"ten\"").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_session_dir_uses_namespace() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/drill")),
            namespace: "spanish".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.session_dir().unwrap(),
            PathBuf::from("/tmp/drill/spanish")
        );
    }

    #[test]
    fn test_session_dir_rejects_path_namespaces() {
        for namespace in ["", ".", "..", "../x", "a/b", "a\\b", "/etc"] {
            let config = Config {
                data_dir: Some(PathBuf::from("/tmp/drill")),
                namespace: namespace.to_string(),
                ..Default::default()
            };
            assert!(
                matches!(config.session_dir(), Err(ConfigError::InvalidNamespace(_))),
                "{:?} should be rejected",
                namespace
            );
        }

        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/drill")),
            namespace: "..german".to_string(),
            ..Default::default()
        };
        assert_eq!(config.session_dir().unwrap(), PathBuf::from("/tmp/drill/..german"));
    }
}
