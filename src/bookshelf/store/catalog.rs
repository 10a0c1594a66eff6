use super::backend::StorageBackend;
use crate::error::{CatalogError, Result};
use crate::model::{Book, Status};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to do when the store exists but does not hold a list of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Start empty. The bad file is overwritten by the next save.
    #[default]
    Discard,
    /// Move the bad file aside, then start empty.
    Backup,
    /// Refuse to open the catalog.
    Fail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub on_malformed: MalformedPolicy,
    /// Drop records that fail to rebuild instead of failing the whole load.
    pub skip_invalid_records: bool,
}

/// Named, optional search criteria. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the author.
    pub author: Option<String>,
    /// Exact publication year.
    pub year: Option<i64>,
}

impl SearchFilter {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Book),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Changed(Book),
    InvalidStatus(String),
    NotFound,
}

/// The in-memory catalog and its persistence.
///
/// Records keep insertion order. Every successful mutation rewrites the whole
/// store; reads never touch the backend. If a save fails the in-memory change
/// is kept and the error is returned, so the store lags until the next save.
pub struct Catalog<B: StorageBackend> {
    backend: B,
    records: Vec<Book>,
    options: LoadOptions,
}

impl<B: StorageBackend> Catalog<B> {
    pub fn open(backend: B) -> Result<Self> {
        Self::open_with(backend, LoadOptions::default())
    }

    pub fn open_with(backend: B, options: LoadOptions) -> Result<Self> {
        let mut catalog = Self {
            backend,
            records: Vec::new(),
            options,
        };
        catalog.load()?;
        Ok(catalog)
    }

    /// Replace the in-memory records with the store's contents.
    pub fn load(&mut self) -> Result<()> {
        let Some(raw) = self.backend.read()? else {
            debug!(path = %self.backend.location().display(), "No store yet, starting empty");
            self.records = Vec::new();
            return Ok(());
        };

        let entries = match parse_document(&raw) {
            Ok(entries) => entries,
            Err(reason) => return self.recover_malformed(reason),
        };

        let mut records = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            match Book::from_representation(entry) {
                Ok(book) => records.push(book),
                Err(e) if self.options.skip_invalid_records => {
                    warn!(position, error = %e, "Skipping invalid record");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            records = records.len(),
            path = %self.backend.location().display(),
            "Catalog loaded"
        );
        self.records = records;
        Ok(())
    }

    fn recover_malformed(&mut self, reason: String) -> Result<()> {
        let path = self.backend.location();
        match self.options.on_malformed {
            MalformedPolicy::Discard => {
                warn!(path = %path.display(), %reason, "Store is malformed, starting empty");
            }
            MalformedPolicy::Backup => {
                let suffix = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
                let moved_to = self.backend.quarantine(&suffix)?;
                warn!(
                    path = %path.display(),
                    backup = %moved_to.display(),
                    %reason,
                    "Store is malformed, moved aside and starting empty"
                );
            }
            MalformedPolicy::Fail => {
                return Err(CatalogError::MalformedStore { path, reason });
            }
        }
        self.records = Vec::new();
        Ok(())
    }

    /// Overwrite the store with every record, pretty printed.
    pub fn save(&self) -> Result<()> {
        let document: Vec<Value> = self
            .records
            .iter()
            .map(|book| Value::Object(book.to_representation()))
            .collect();

        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        document.serialize(&mut ser)?;
        let contents = String::from_utf8(buf).map_err(|e| CatalogError::Store(e.to_string()))?;

        self.backend.write(&contents)?;
        debug!(
            records = self.records.len(),
            path = %self.backend.location().display(),
            "Catalog saved"
        );
        Ok(())
    }

    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
    ) -> Result<Book> {
        let book = Book::new(title, author, year);
        self.records.push(book.clone());
        self.save()?;
        info!(id = %book.id, title = %book.title, "Book added");
        Ok(book)
    }

    /// Remove the first record with `id`.
    pub fn delete(&mut self, id: &str) -> Result<DeleteOutcome> {
        let Some(position) = self.position(id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        let removed = self.records.remove(position);
        self.save()?;
        info!(id = %removed.id, "Book deleted");
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Parse `new_status` and apply it. An unknown status never touches the
    /// records or the store.
    pub fn change_status(&mut self, id: &str, new_status: &str) -> Result<StatusOutcome> {
        match new_status.parse::<Status>() {
            Ok(status) => self.set_status(id, status),
            Err(_) => Ok(StatusOutcome::InvalidStatus(new_status.to_string())),
        }
    }

    pub fn set_status(&mut self, id: &str, status: Status) -> Result<StatusOutcome> {
        let Some(position) = self.position(id) else {
            return Ok(StatusOutcome::NotFound);
        };
        self.records[position].status = status;
        self.save()?;
        info!(id, status = %status, "Book status changed");
        Ok(StatusOutcome::Changed(self.records[position].clone()))
    }

    /// Filters are applied one after another to the previous step's output:
    /// title, then author, then year.
    pub fn search(&self, filter: &SearchFilter) -> Vec<Book> {
        let mut results: Vec<&Book> = self.records.iter().collect();

        if let Some(title) = &filter.title {
            let needle = title.to_lowercase();
            results.retain(|book| book.title.to_lowercase().contains(&needle));
        }
        if let Some(author) = &filter.author {
            let needle = author.to_lowercase();
            results.retain(|book| book.author.to_lowercase().contains(&needle));
        }
        if let Some(year) = filter.year {
            results.retain(|book| book.year == year);
        }

        results.into_iter().cloned().collect()
    }

    pub fn list_all(&self) -> &[Book] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.records.iter().find(|book| book.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn store_location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|book| book.id == id)
    }
}

/// Bytes that are not UTF-8 fail here like any other bad JSON.
fn parse_document(raw: &[u8]) -> std::result::Result<Vec<Value>, String> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Array(entries)) => Ok(entries),
        Ok(_) => Err("top-level value is not a list of records".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn catalog() -> Catalog<MemBackend> {
        Catalog::open(MemBackend::new()).unwrap()
    }

    fn reopen(catalog: &Catalog<MemBackend>) -> Catalog<MemBackend> {
        let document = catalog.backend().document().unwrap_or_default();
        Catalog::open(MemBackend::with_document(document)).unwrap()
    }

    #[test]
    fn missing_store_opens_empty_without_writing() {
        let catalog = catalog();
        assert!(catalog.is_empty());
        assert_eq!(catalog.backend().write_count(), 0);
    }

    #[test]
    fn add_grows_by_one_and_is_retrievable() {
        let mut catalog = catalog();
        let book = catalog.add("Test Title", "Test Author", 2020).unwrap();

        assert_eq!(catalog.len(), 1);
        let found = catalog.get(&book.id).unwrap();
        assert_eq!(found.title, "Test Title");
        assert_eq!(found.status, Status::Available);
        assert_eq!(catalog.backend().write_count(), 1);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut catalog = catalog();
        let keep = catalog.add("Keep", "A", 2000).unwrap();
        let gone = catalog.add("Gone", "B", 2001).unwrap();

        let outcome = catalog.delete(&gone.id).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(gone.clone()));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(&gone.id).is_none());
        assert!(catalog.get(&keep.id).is_some());
    }

    #[test]
    fn delete_unknown_id_reports_not_found_and_does_not_save() {
        let mut catalog = catalog();
        catalog.add("Book", "A", 2000).unwrap();
        let writes = catalog.backend().write_count();

        let outcome = catalog.delete("nonexistent-id").unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.backend().write_count(), writes);
    }

    #[test]
    fn delete_removes_only_first_duplicate() {
        let doc = r#"[
            {"id": "dup", "title": "First", "author": "A", "year": 1, "status": "available"},
            {"id": "dup", "title": "Second", "author": "B", "year": 2, "status": "available"}
        ]"#;
        let mut catalog = Catalog::open(MemBackend::with_document(doc)).unwrap();

        catalog.delete("dup").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list_all()[0].title, "Second");
    }

    #[test]
    fn search_by_title_is_case_insensitive_substring() {
        let mut catalog = catalog();
        catalog.add("Python Programming", "Author A", 2021).unwrap();
        catalog.add("python for kids", "Author B", 2019).unwrap();
        catalog.add("Rust in Action", "Author C", 2021).unwrap();

        let results = catalog.search(&SearchFilter::default().title("PYTHON"));
        let titles: Vec<_> = results.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Python Programming", "python for kids"]);
    }

    #[test]
    fn search_by_author_and_year() {
        let mut catalog = catalog();
        catalog.add("Book One", "Author A", 2021).unwrap();
        catalog.add("Book Two", "Author B", 2022).unwrap();
        catalog.add("Book Three", "Author B", 2021).unwrap();

        let by_author = catalog.search(&SearchFilter::default().author("author b"));
        assert_eq!(by_author.len(), 2);

        let by_year = catalog.search(&SearchFilter::default().year(2022));
        assert_eq!(by_year.len(), 1);
        assert_eq!(by_year[0].title, "Book Two");

        let both = catalog.search(&SearchFilter::default().author("Author B").year(2021));
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "Book Three");
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let mut catalog = catalog();
        catalog.add("B", "x", 1).unwrap();
        catalog.add("A", "y", 2).unwrap();

        let results = catalog.search(&SearchFilter::default());
        assert_eq!(results, catalog.list_all().to_vec());
    }

    #[test]
    fn change_status_persists() {
        let mut catalog = catalog();
        let book = catalog.add("Book One", "Author A", 2021).unwrap();

        let outcome = catalog.change_status(&book.id, "checked_out").unwrap();
        assert!(matches!(outcome, StatusOutcome::Changed(ref b) if b.status == Status::CheckedOut));

        let reloaded = reopen(&catalog);
        assert_eq!(reloaded.get(&book.id).unwrap().status, Status::CheckedOut);
    }

    #[test]
    fn invalid_status_changes_nothing() {
        let mut catalog = catalog();
        let book = catalog.add("Book One", "Author A", 2021).unwrap();
        let writes = catalog.backend().write_count();

        let outcome = catalog.change_status(&book.id, "invalid-value").unwrap();
        assert_eq!(outcome, StatusOutcome::InvalidStatus("invalid-value".into()));
        assert_eq!(catalog.get(&book.id).unwrap().status, Status::Available);
        assert_eq!(catalog.backend().write_count(), writes);
    }

    #[test]
    fn invalid_status_is_checked_before_lookup() {
        let mut catalog = catalog();
        let outcome = catalog.change_status("missing", "lost").unwrap();
        assert_eq!(outcome, StatusOutcome::InvalidStatus("lost".into()));
    }

    #[test]
    fn change_status_unknown_id() {
        let mut catalog = catalog();
        let outcome = catalog.change_status("missing", "available").unwrap();
        assert_eq!(outcome, StatusOutcome::NotFound);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut catalog = catalog();
        catalog.add("Война и мир", "Лев Толстой", 1869).unwrap();
        let second = catalog.add("Dune", "Frank Herbert", 1965).unwrap();
        catalog.set_status(&second.id, Status::CheckedOut).unwrap();

        let reloaded = reopen(&catalog);
        assert_eq!(reloaded.list_all(), catalog.list_all());
    }

    #[test]
    fn saved_document_is_indented_and_keeps_non_ascii() {
        let mut catalog = catalog();
        catalog.add("Война и мир", "Лев Толстой", 1869).unwrap();

        let doc = catalog.backend().document().unwrap();
        assert!(doc.contains("Война и мир"));
        assert!(doc.contains("\n        \"title\""));
        let id_pos = doc.find("\"id\"").unwrap();
        let status_pos = doc.find("\"status\"").unwrap();
        assert!(id_pos < status_pos);
    }

    #[test]
    fn malformed_store_is_discarded_by_default() {
        let backend = MemBackend::with_document("{ not json");
        let catalog = Catalog::open(backend).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.backend().quarantined().is_empty());
    }

    #[test]
    fn non_list_document_counts_as_malformed() {
        let catalog = Catalog::open(MemBackend::with_document(r#"{"id": "x"}"#)).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn malformed_store_backup_policy_moves_document_aside() {
        let options = LoadOptions {
            on_malformed: MalformedPolicy::Backup,
            ..Default::default()
        };
        let catalog = Catalog::open_with(MemBackend::with_document("garbage"), options).unwrap();

        assert!(catalog.is_empty());
        let quarantined = catalog.backend().quarantined();
        assert_eq!(quarantined.len(), 1);
        assert_eq!(quarantined[0].1, b"garbage");
        assert!(catalog.backend().document().is_none());
    }

    #[test]
    fn undecodable_bytes_count_as_malformed() {
        let bytes = vec![0xff, 0xfe, 0x00, 0x5b];
        let catalog = Catalog::open(MemBackend::with_document(bytes.clone())).unwrap();
        assert!(catalog.is_empty());

        let options = LoadOptions {
            on_malformed: MalformedPolicy::Backup,
            ..Default::default()
        };
        let catalog = Catalog::open_with(MemBackend::with_document(bytes.clone()), options).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.backend().quarantined()[0].1, bytes);
    }

    #[test]
    fn malformed_store_fail_policy_errors() {
        let options = LoadOptions {
            on_malformed: MalformedPolicy::Fail,
            ..Default::default()
        };
        let result = Catalog::open_with(MemBackend::with_document("garbage"), options);
        assert!(matches!(result, Err(CatalogError::MalformedStore { .. })));
    }

    #[test]
    fn missing_field_fails_the_whole_load() {
        let doc = r#"[
            {"id": "a", "title": "Ok", "author": "A", "year": 1, "status": "available"},
            {"id": "b", "author": "B", "year": 2, "status": "available"}
        ]"#;
        let result = Catalog::open(MemBackend::with_document(doc));
        assert!(matches!(result, Err(CatalogError::MissingField("title"))));
    }

    #[test]
    fn skip_invalid_records_keeps_the_rest() {
        let doc = r#"[
            {"id": "a", "title": "Ok", "author": "A", "year": 1, "status": "available"},
            {"id": "b", "author": "B", "year": 2, "status": "available"},
            {"id": "c", "title": "Also ok", "author": "C", "year": 3, "status": "checked_out"}
        ]"#;
        let options = LoadOptions {
            skip_invalid_records: true,
            ..Default::default()
        };
        let catalog = Catalog::open_with(MemBackend::with_document(doc), options).unwrap();
        let ids: Vec<_> = catalog.list_all().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn failed_save_keeps_in_memory_change() {
        let mut catalog = catalog();
        catalog.backend().set_simulate_write_error(true);

        let result = catalog.add("Unsaved", "A", 2000);
        assert!(matches!(result, Err(CatalogError::Store(_))));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.backend().document().is_none());
    }
}
