use thiserror::Error;

use crate::config::ConfigError;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::wordlist::LoadError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error loading cards: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
