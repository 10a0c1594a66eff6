//! # Storage Layer
//!
//! The catalog is a flat, ordered list of books persisted as one JSON document.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: the "how". Reads and writes the raw document.
//!   - [`fs_backend::FsBackend`]: production, a single JSON file written atomically
//!     (tmp file then rename).
//!   - [`mem_backend::MemBackend`]: in-memory document for tests, with write error
//!     simulation.
//! - [`catalog::Catalog`]: the "what". Owns the records, rebuilds them from the
//!   document on load, and rewrites the whole document after every mutation.
//!
//! ## Load Rules
//!
//! 1. **Missing store**: empty catalog. Nothing is written until the first mutation.
//! 2. **Malformed store** (not JSON, or not a list): handled per [`catalog::MalformedPolicy`].
//!    The default discards the contents and starts empty.
//! 3. **Bad record** (missing key, wrong type): fails the load, unless
//!    `skip_invalid_records` is set.
//!
//! ## Storage Format
//!
//! ```text
//! [
//!     {
//!         "id": "8c5b0f3e-…",
//!         "title": "Dune",
//!         "author": "Frank Herbert",
//!         "year": 1965,
//!         "status": "available"
//!     }
//! ]
//! ```
//!
//! Indented with four spaces; non-ASCII text is written as-is.

pub mod backend;
pub mod catalog;
pub mod fs_backend;
pub mod mem_backend;
