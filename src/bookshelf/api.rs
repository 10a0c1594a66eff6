//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for catalog operations, whatever UI sits on top.
//!
//! It dispatches to `commands/*.rs` and returns structured `CmdResult` values.
//! It does no business logic and no terminal output.
//!
//! `CatalogApi<B: StorageBackend>` is generic over the backend:
//! - Production: `CatalogApi<FsBackend>`
//! - Testing: `CatalogApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::catalog::{Catalog, LoadOptions};

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::store::catalog::{MalformedPolicy, SearchFilter};

pub struct CatalogApi<B: StorageBackend> {
    catalog: Catalog<B>,
}

impl<B: StorageBackend> CatalogApi<B> {
    pub fn new(catalog: Catalog<B>) -> Self {
        Self { catalog }
    }

    pub fn open(backend: B, options: LoadOptions) -> Result<Self> {
        Ok(Self::new(Catalog::open_with(backend, options)?))
    }

    pub fn add_book(&mut self, title: String, author: String, year: i64) -> Result<CmdResult> {
        commands::add::run(&mut self.catalog, title, author, year)
    }

    pub fn delete_book(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.catalog, id)
    }

    pub fn search_books(&self, filter: &SearchFilter) -> Result<CmdResult> {
        Ok(commands::search::run(&self.catalog, filter))
    }

    pub fn list_books(&self) -> Result<CmdResult> {
        Ok(commands::list::run(&self.catalog))
    }

    pub fn change_status(&mut self, id: &str, new_status: &str) -> Result<CmdResult> {
        commands::status::run(&mut self.catalog, id, new_status)
    }

    pub fn catalog(&self) -> &Catalog<B> {
        &self.catalog
    }
}
