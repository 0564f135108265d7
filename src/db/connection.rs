use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".badge-kiosk";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "kiosk.sqlite";

/// Open (or create) the database at `path`, creating parent folders first,
/// and make sure the slot table exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path).map_err(|source| Error::DatabaseOpen {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Throwaway database used by tests and dry runs.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Run lazy migrations. The kiosk keeps whole documents in named slots, so a
/// single key/value table is all the schema there is.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS slots (
            name TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Directory holding the database, the log file and the default config.
pub fn data_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_database_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("kiosk.sqlite");
        let conn = open_database(&path).unwrap();
        assert!(path.exists());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
    }
}
