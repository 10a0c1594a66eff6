use crate::error::{CatalogError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Keys every stored record must carry, in the order they are checked.
pub const RECORD_FIELDS: [&str; 5] = ["id", "title", "author", "year", "status"];

/// Labels written by older catalog files. Accepted on read, never written.
const LEGACY_AVAILABLE: &str = "в наличии";
const LEGACY_CHECKED_OUT: &str = "выдана";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Available,
    CheckedOut,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Available, Status::CheckedOut];

    /// The value stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::CheckedOut => "checked_out",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::CheckedOut => "checked out",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" | LEGACY_AVAILABLE => Ok(Status::Available),
            "checked_out" | "checked-out" | LEGACY_CHECKED_OUT => Ok(Status::CheckedOut),
            _ => Err(CatalogError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub status: Status,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, author, year)
    }

    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            year,
            status: Status::Available,
        }
    }

    pub fn to_representation(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("title".into(), Value::String(self.title.clone()));
        map.insert("author".into(), Value::String(self.author.clone()));
        map.insert("year".into(), Value::from(self.year));
        map.insert("status".into(), Value::String(self.status.as_str().into()));
        map
    }

    /// Rebuilds a book from a stored mapping.
    ///
    /// Presence of all five keys is checked before any value is inspected, so a
    /// record missing `title` and carrying a bad `year` reports the missing key.
    pub fn from_representation(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            CatalogError::InvalidRecord(format!("expected a mapping, found {}", kind_of(value)))
        })?;

        for field in RECORD_FIELDS {
            if !map.contains_key(field) {
                return Err(CatalogError::MissingField(field));
            }
        }

        let id = string_field(map, "id")?;
        let title = string_field(map, "title")?;
        let author = string_field(map, "author")?;
        let year = map["year"]
            .as_i64()
            .ok_or_else(|| CatalogError::InvalidField {
                field: "year",
                reason: format!("expected an integer, found {}", kind_of(&map["year"])),
            })?;
        let raw_status = string_field(map, "status")?;
        let status = raw_status
            .parse::<Status>()
            .map_err(|_| CatalogError::InvalidField {
                field: "status",
                reason: format!("unknown status '{}'", raw_status),
            })?;

        Ok(Self {
            id,
            title,
            author,
            year,
            status,
        })
    }
}

fn string_field(map: &Map<String, Value>, field: &'static str) -> Result<String> {
    match &map[field] {
        Value::String(s) => Ok(s.clone()),
        other => Err(CatalogError::InvalidField {
            field,
            reason: format!("expected a string, found {}", kind_of(other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
