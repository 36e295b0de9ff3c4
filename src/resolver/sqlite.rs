//! SQLite-backed country lookup.
//!
//! Expects a `places_countries(name TEXT, country TEXT)` table. The place
//! name is always passed as a bound parameter.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OpenFlags};

use super::CountryLookup;

const COUNTRIES_BY_NAME: &str =
    "SELECT country FROM places_countries WHERE lower(name) = ?1 ORDER BY rowid";

pub struct SqliteCountryTable {
    conn: Mutex<Connection>,
}

impl SqliteCountryTable {
    /// Open an existing database read-only.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Failed to open lookup database {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// Wrap an already open connection. Fails if the lookup table is missing.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.prepare(COUNTRIES_BY_NAME)
            .context("Lookup database has no usable places_countries table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl CountryLookup for SqliteCountryTable {
    fn countries_for(&self, name: &str) -> Result<Vec<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Lookup database connection poisoned"))?;
        let mut stmt = conn.prepare_cached(COUNTRIES_BY_NAME)?;
        let countries = stmt
            .query_map(rusqlite::params![name], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(countries)
    }
}

impl std::fmt::Debug for SqliteCountryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCountryTable").finish_non_exhaustive()
    }
}
