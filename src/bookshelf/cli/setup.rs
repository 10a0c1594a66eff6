use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Level implied by `-v` repetitions when `--log-level` is not given.
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => LogLevel::Warn,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bookshelf", bin_name = "bookshelf", version = get_version())]
#[command(about = "A small, file-backed book catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog file (overrides BOOKSHELF_STORE and the config file)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub store: Option<PathBuf>,

    /// Config file to read instead of the default one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Log level (overrides -v)
    #[arg(long, global = true, value_enum, help_heading = "Options")]
    pub log_level: Option<LogLevel>,
}

impl Cli {
    pub fn effective_log_level(&self) -> LogLevel {
        match self.log_level {
            Some(level) => level,
            None => LogLevel::from_verbosity(self.verbose),
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add a book to the catalog
    #[command(alias = "a", display_order = 1)]
    Add {
        title: String,
        author: String,
        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i64,
    },

    /// Delete a book by id
    #[command(alias = "rm", display_order = 2)]
    Delete { id: String },

    /// Search books; all given filters must match
    #[command(alias = "s", display_order = 3)]
    Search {
        /// Part of the title (case-insensitive)
        #[arg(short, long)]
        title: Option<String>,

        /// Part of the author name (case-insensitive)
        #[arg(short, long)]
        author: Option<String>,

        /// Exact publication year
        #[arg(short, long, allow_negative_numbers = true)]
        year: Option<i64>,
    },

    /// List all books
    #[command(alias = "ls", display_order = 4)]
    List,

    /// Change a book's status (available, checked_out)
    #[command(display_order = 5)]
    Status { id: String, status: String },

    /// Show the effective configuration
    #[command(display_order = 6)]
    Config,
}
