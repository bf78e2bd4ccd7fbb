//! Where the catalog keeps its files. By default everything lives in a hidden
//! folder under the user's home directory; `COFFEE_CATALOG_DB` points the app
//! at a different database file (the log then sits next to it).

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Environment variable that overrides the database location.
pub const DB_PATH_ENV: &str = "COFFEE_CATALOG_DB";

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".coffee-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "coffee.sqlite";
/// Log file written next to the database.
const LOG_FILE_NAME: &str = "coffee-catalog.log";

/// Resolved file locations for one run of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve paths from the environment, falling back to the home directory.
    pub fn from_env() -> Result<Self> {
        match env::var_os(DB_PATH_ENV).filter(|value| !value.is_empty()) {
            Some(path) => Ok(Self::with_db_path(path)),
            None => Self::default_location(),
        }
    }

    /// Use an explicit database file; the log goes in the same directory.
    pub fn with_db_path(db_path: impl Into<OsString>) -> Self {
        let db_path = PathBuf::from(db_path.into());
        let log_path = db_path.with_file_name(LOG_FILE_NAME);
        Self { db_path, log_path }
    }

    fn default_location() -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or_else(|| {
            anyhow!("unable to determine home directory; set {DB_PATH_ENV} instead")
        })?;
        let data_dir = base_dirs.home_dir().join(DATA_DIR_NAME);
        Ok(Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
        })
    }
}
