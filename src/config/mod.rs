use std::{
    env,
    path::{Path, PathBuf},
};

use crate::storage::{CsvStorage, JsonStorage, MovieStorage};

const FILE_ENV: &str = "MOVIE_CORE_FILE";
const API_KEY_ENV: &str = "OMDB_API_KEY";
const DEFAULT_DIR_NAME: &str = ".movie_core";
const DEFAULT_FILE_NAME: &str = "movies.json";

/// Which serialization format backs the collection file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Json,
    Csv,
}

impl BackendKind {
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Json => "JSON",
            BackendKind::Csv => "CSV",
        }
    }
}

/// Startup configuration: the active backend, its backing file, and the
/// optional enrichment API key. Constructed once and handed to the CLI
/// instead of living in ambient global state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub backend: BackendKind,
    pub omdb_api_key: Option<String>,
}

impl AppConfig {
    /// Resolves configuration from the command line and process environment.
    /// The first argument wins over `MOVIE_CORE_FILE`; the fallback lives
    /// under the home directory.
    pub fn from_env_and_args(mut args: impl Iterator<Item = String>) -> Self {
        let storage_path = args
            .next()
            .map(PathBuf::from)
            .or_else(|| env::var_os(FILE_ENV).map(PathBuf::from))
            .unwrap_or_else(default_storage_path);
        let backend = backend_for_path(&storage_path);
        let omdb_api_key = env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty());
        Self {
            storage_path,
            backend,
            omdb_api_key,
        }
    }

    /// Constructs the storage backend this configuration names.
    pub fn open_storage(&self) -> Box<dyn MovieStorage> {
        match self.backend {
            BackendKind::Json => Box::new(JsonStorage::new(self.storage_path.as_path())),
            BackendKind::Csv => Box::new(CsvStorage::new(self.storage_path.as_path())),
        }
    }
}

/// `.csv` selects the tabular backend; everything else is stored as JSON.
pub fn backend_for_path(path: &Path) -> BackendKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => BackendKind::Csv,
        _ => BackendKind::Json,
    }
}

fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
        .join(DEFAULT_FILE_NAME)
}
