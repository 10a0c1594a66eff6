//! # Configuration
//!
//! Settings live in `config.json` inside the bookshelf data directory
//! (OS-appropriate, via the `directories` crate). A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store_path` | `<data dir>/library.json` | Catalog file. Relative paths resolve against the config file's directory |
//! | `on_malformed` | `discard` | `discard`, `backup` or `fail` when the catalog file is not a list of records |
//! | `skip_invalid_records` | `false` | Drop records that cannot be rebuilt instead of failing the load |
//!
//! The store path can also be set with `BOOKSHELF_STORE` or `--store`; see
//! [`crate::init`] for precedence.

use crate::error::{CatalogError, Result};
use crate::store::catalog::{LoadOptions, MalformedPolicy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BookshelfConfig {
    pub store_path: Option<PathBuf>,

    pub on_malformed: MalformedPolicy,

    pub skip_invalid_records: bool,
}

impl BookshelfConfig {
    /// Load config from the given file, or return defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(CatalogError::Io)?;
        serde_json::from_str(&content).map_err(|e| {
            CatalogError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            on_malformed: self.on_malformed,
            skip_invalid_records: self.skip_invalid_records,
        }
    }

    /// Key/value pairs for display.
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        let on_malformed = match self.on_malformed {
            MalformedPolicy::Discard => "discard",
            MalformedPolicy::Backup => "backup",
            MalformedPolicy::Fail => "fail",
        };
        let store_path = match &self.store_path {
            Some(path) => path.display().to_string(),
            None => "(default)".to_string(),
        };
        let skip = self.skip_invalid_records.to_string();
        vec![
            ("store_path", store_path),
            ("on_malformed", on_malformed.to_string()),
            ("skip_invalid_records", skip),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BookshelfConfig::default();
        assert_eq!(config.store_path, None);
        assert_eq!(config.on_malformed, MalformedPolicy::Discard);
        assert!(!config.skip_invalid_records);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = BookshelfConfig::load(temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, BookshelfConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"{"on_malformed": "backup"}"#).unwrap();

        let config = BookshelfConfig::load(&path).unwrap();
        assert_eq!(config.on_malformed, MalformedPolicy::Backup);
        assert!(!config.skip_invalid_records);
        assert_eq!(config.store_path, None);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"{"on_malformed": "shrug"}"#).unwrap();

        assert!(matches!(
            BookshelfConfig::load(&path),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn test_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"{"store_path": "books.json", "on_malformed": "fail", "skip_invalid_records": true}"#,
        )
        .unwrap();

        let expected = BookshelfConfig {
            store_path: Some(PathBuf::from("books.json")),
            on_malformed: MalformedPolicy::Fail,
            skip_invalid_records: true,
        };
        assert_eq!(BookshelfConfig::load(&path).unwrap(), expected);
    }

    #[test]
    fn test_load_options() {
        let config = BookshelfConfig {
            on_malformed: MalformedPolicy::Backup,
            skip_invalid_records: true,
            ..Default::default()
        };
        let options = config.load_options();
        assert_eq!(options.on_malformed, MalformedPolicy::Backup);
        assert!(options.skip_invalid_records);
    }
}
