//! Word list loading
//!
//! A word list is a JSON array of `{ "original": ..., "translated": ... }`
//! records, read from disk or fetched over http(s).

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::session::Card;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid word list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No word list given; pass one on the command line or set `word_list` in the config file")]
    MissingSource,
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Where a word list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    Url(String),
    File(PathBuf),
}

impl FromStr for WordSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl WordSource {
    /// Fetch and decode the list, keeping source order
    pub fn load(&self) -> Result<Vec<Card>> {
        let body = match self {
            Self::File(path) => fs::read_to_string(path)?,
            Self::Url(url) => reqwest::blocking::get(url)?.error_for_status()?.text()?,
        };
        let cards = parse_word_list(&body)?;
        log::info!("Loaded {} cards from {}", cards.len(), self);
        Ok(cards)
    }
}

/// Load from `source`, failing with `MissingSource` when there is none
pub fn load_word_list(source: Option<&WordSource>) -> Result<Vec<Card>> {
    match source {
        Some(source) => source.load(),
        None => Err(LoadError::MissingSource),
    }
}

pub fn parse_word_list(json: &str) -> Result<Vec<Card>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_from_str() {
        assert_eq!(
            "https://example.org/words.json".parse::<WordSource>().unwrap(),
            WordSource::Url("https://example.org/words.json".to_string())
        );
        assert_eq!(
            "words.json".parse::<WordSource>().unwrap(),
            WordSource::File(PathBuf::from("words.json"))
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("words.json");
        fs::write(
            &path,
            r#"[{"original":"Hund","translated":"dog"},{"original":"Katze","translated":"cat"}]"#,
        )
        .unwrap();

        let cards = WordSource::File(path).load().unwrap();
        assert_eq!(
            cards,
            vec![Card::new("Hund", "dog"), Card::new("Katze", "cat")]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = WordSource::File(temp.path().join("nope.json")).load();
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_without_source() {
        assert!(matches!(load_word_list(None), Err(LoadError::MissingSource)));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(
            parse_word_list(r#"[{"original":"Hund"}]"#),
            Err(LoadError::Json(_))
        ));
        assert!(parse_word_list("[]").unwrap().is_empty());
    }
}
