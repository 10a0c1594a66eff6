use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid status '{0}'. Allowed values: available, checked_out")]
    InvalidStatus(String),

    #[error("Record is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Record field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Malformed store at {}: {reason}", path.display())]
    MalformedStore { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
