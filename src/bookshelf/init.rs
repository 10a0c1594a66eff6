use crate::api::CatalogApi;
use crate::config::{BookshelfConfig, CONFIG_FILENAME};
use crate::error::Result;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the catalog file.
pub const STORE_ENV: &str = "BOOKSHELF_STORE";
pub const DEFAULT_STORE_FILE: &str = "library.json";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub store: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

pub struct BookshelfContext {
    pub api: CatalogApi<FsBackend>,
    pub config: BookshelfConfig,
    pub config_path: PathBuf,
    pub store_path: PathBuf,
}

/// OS data directory for bookshelf, or `cwd` when the platform has none.
pub fn data_dir(cwd: &Path) -> PathBuf {
    ProjectDirs::from("org", "bookshelf", "bookshelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| cwd.to_path_buf())
}

/// Pick the catalog file: flag, then environment, then config, then the
/// default file in the data directory.
///
/// Flag and environment paths are relative to `cwd`; a config path is relative
/// to the directory holding the config file.
pub fn resolve_store_path(
    cwd: &Path,
    overrides: &Overrides,
    env_store: Option<PathBuf>,
    config: &BookshelfConfig,
    config_path: &Path,
    data_dir: &Path,
) -> PathBuf {
    if let Some(path) = overrides.store.clone().or(env_store) {
        return cwd.join(path);
    }
    if let Some(path) = &config.store_path {
        let base = config_path.parent().unwrap_or(data_dir);
        return base.join(path);
    }
    data_dir.join(DEFAULT_STORE_FILE)
}

pub fn initialize(cwd: &Path, overrides: &Overrides) -> Result<BookshelfContext> {
    let data_dir = data_dir(cwd);
    let config_path = overrides
        .config_file
        .as_ref()
        .map(|p| cwd.join(p))
        .unwrap_or_else(|| data_dir.join(CONFIG_FILENAME));
    let config = BookshelfConfig::load(&config_path)?;

    let env_store = std::env::var_os(STORE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let store_path = resolve_store_path(
        cwd,
        overrides,
        env_store,
        &config,
        &config_path,
        &data_dir,
    );
    debug!(
        store = %store_path.display(),
        config = %config_path.display(),
        "Resolved catalog paths"
    );

    let api = CatalogApi::open(FsBackend::new(&store_path), config.load_options())?;

    Ok(BookshelfContext {
        api,
        config,
        config_path,
        store_path,
    })
}
