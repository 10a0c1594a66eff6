//! # CLI Layer
//!
//! One possible client of the bookshelf library. It is the only place that:
//! - Parses arguments
//! - Writes to stdout/stderr
//! - Chooses the process exit code
//! - Installs the logging subscriber
//!
//! ## Commands
//!
//! - `bookshelf add <title> <author> <year>` — Add a book, prints its id.
//! - `bookshelf delete <id>` (`rm`) — Delete a book.
//! - `bookshelf search [--title T] [--author A] [--year Y]` — Filters combine with AND.
//! - `bookshelf list` (`ls`, also the default) — Show every book.
//! - `bookshelf status <id> <available|checked_out>` — Change availability.
//! - `bookshelf config` — Show the effective configuration and paths.
//!
//! Tables and success messages go to stdout; error messages and logs go to
//! stderr. A command that reports an error (unknown id, invalid status) exits
//! with status 1.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers
//! - `logging`: `tracing` subscriber setup
//! - `render`: Table and message formatting
//! - `setup`: Argument parsing via clap

mod commands;
mod logging;
mod render;
pub mod setup;

pub use commands::run;
