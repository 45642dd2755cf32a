use std::path::PathBuf;

use anyhow::{Context, Result};

use flashdrill_lib::config::Config;
use flashdrill_lib::storage::{FileStore, SessionStorage};
use flashdrill_lib::wordlist::WordSource;

/// Command line values that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub namespace: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub no_history: bool,
}

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub session_dir: PathBuf,
}

impl App {
    pub fn new(overrides: Overrides) -> Result<Self> {
        let config_path = match overrides.config {
            Some(path) => path,
            None => Config::default_path().context("Failed to locate config directory")?,
        };
        let mut config = Config::load(&config_path)
            .with_context(|| format!("Failed to read config {:?}", config_path))?;

        if let Some(namespace) = overrides.namespace {
            config.namespace = namespace;
        }
        if let Some(data_dir) = overrides.data_dir {
            config.data_dir = Some(data_dir);
        }
        if overrides.no_history {
            config.history_aware = false;
        }

        let session_dir = config
            .session_dir()
            .context("Failed to get data directory")?;
        log::debug!("Using session directory {:?}", session_dir);

        Ok(Self {
            config,
            session_dir,
        })
    }

    pub fn storage(&self) -> SessionStorage<FileStore> {
        SessionStorage::new(FileStore::new(self.session_dir.clone()))
    }

    /// Word list from the command line, else from the config file
    pub fn word_source(&self, arg: Option<&str>) -> Option<WordSource> {
        match arg {
            Some(arg) => arg.parse().ok(),
            None => self.config.word_source(),
        }
    }
}
