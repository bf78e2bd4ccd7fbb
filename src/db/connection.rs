use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rusqlite::Connection;

use super::coffee;
use super::error::{Result, StoreError};
use crate::models::{Coffee, CoffeeDraft};

/// Owned handle to the catalog database. The UI holds exactly one of these for
/// the lifetime of the program and lends it out by reference; [`close`]
/// consumes it so the connection can only be released once.
///
/// [`close`]: CatalogStore::close
pub struct CatalogStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl CatalogStore {
    /// Open (or create) the SQLite file at `path` and make sure the `coffee`
    /// table exists. Missing parent directories are created first.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| unavailable(path, err))?;
            }
        }

        let conn = Connection::open(path).map_err(|err| unavailable(path, err))?;
        ensure_schema(&conn).map_err(|err| unavailable(path, err))?;

        info!("opened catalog store at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory store. Handy for tests and previews.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|err| unavailable(Path::new(":memory:"), err))?;
        ensure_schema(&conn).map_err(|err| unavailable(Path::new(":memory:"), err))?;
        Ok(Self { conn, path: None })
    }

    /// Location of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Every row in the order SQLite returns them.
    pub fn fetch_all(&self) -> Result<Vec<Coffee>> {
        coffee::fetch_all(&self.conn)
    }

    /// The row with `id`, if any.
    pub fn fetch_one(&self, id: i64) -> Result<Option<Coffee>> {
        coffee::fetch_one(&self.conn, id)
    }

    /// Insert a new row and return the id SQLite assigned to it.
    pub fn insert(&self, draft: &CoffeeDraft) -> Result<i64> {
        coffee::insert(&self.conn, draft)
    }

    /// Overwrite every editable field of row `id`. A missing id is a no-op.
    pub fn update(&self, id: i64, draft: &CoffeeDraft) -> Result<()> {
        coffee::update(&self.conn, id, draft)
    }

    /// Release the connection.
    pub fn close(self) -> Result<()> {
        let label = self
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());

        match self.conn.close() {
            Ok(()) => {
                info!("closed catalog store at {label}");
                Ok(())
            }
            Err((_conn, err)) => {
                warn!("failed to close catalog store at {label}: {err}");
                Err(StoreError::Close(err))
            }
        }
    }
}

/// Create the `coffee` table when it is missing. Existing files are left
/// untouched; there is no migration story beyond this.
pub(super) fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS coffee (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            roast_level TEXT NOT NULL,
            type TEXT NOT NULL,
            taste_description TEXT,
            price REAL NOT NULL,
            package_volume REAL NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
