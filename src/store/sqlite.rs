//! SQLite Store backend
//!
//! Durable storage in a single `widget` table. One connection behind a
//! mutex serializes every call, which makes each call atomic.

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use tracing::info;

use super::{Store, StoreError, StoreResult};
use crate::models::{Item, ItemDraft, ItemId, ItemPatch};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS widget (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        price REAL NOT NULL,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_widget_category ON widget(category);
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, category, price, created_at FROM widget";

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Store backed by a SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        let store = Self::with_connection(conn)?;
        info!("SQLite store opened at {}", path.display());
        Ok(store)
    }

    /// Opens a private in-memory database, mostly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let id: i64 = row.get(0)?;
    let created_at: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Item {
        id: id as ItemId,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
        created_at,
    })
}

fn find(conn: &Connection, id: ItemId) -> StoreResult<Option<Item>> {
    // Ids beyond the SQLite integer range can never have been assigned
    let Ok(key) = i64::try_from(id) else {
        return Ok(None);
    };
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    Ok(conn.query_row(&sql, params![key], row_to_item).optional()?)
}

impl Store for SqliteStore {
    fn create(&self, draft: ItemDraft) -> StoreResult<Item> {
        let conn = self.conn.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO widget (name, category, price, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![draft.name, draft.category, draft.price, created_at.to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid() as ItemId;
        Ok(Item::from_draft(id, draft, created_at))
    }

    fn read(&self, id: ItemId) -> StoreResult<Option<Item>> {
        find(&self.conn.lock(), id)
    }

    fn replace(&self, id: ItemId, patch: &ItemPatch) -> StoreResult<Item> {
        let conn = self.conn.lock();
        let mut item = find(&conn, id)?.ok_or(StoreError::NotFound(id))?;
        item.apply(patch);
        conn.execute(
            "UPDATE widget SET name = ?1, category = ?2, price = ?3 WHERE id = ?4",
            params![item.name, item.category, item.price, id as i64],
        )?;
        Ok(item)
    }

    fn delete(&self, id: ItemId) -> StoreResult<()> {
        let conn = self.conn.lock();
        let key = i64::try_from(id).map_err(|_| StoreError::NotFound(id))?;
        match conn.execute("DELETE FROM widget WHERE id = ?1", params![key])? {
            0 => Err(StoreError::NotFound(id)),
            _ => Ok(()),
        }
    }

    fn list(&self, category: Option<&str>) -> StoreResult<Vec<Item>> {
        let conn = self.conn.lock();
        let items = match category {
            Some(category) => {
                let sql = format!("{SELECT_COLUMNS} WHERE category = ?1 ORDER BY id");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![category], row_to_item)?;
                let items = rows.collect::<rusqlite::Result<Vec<_>>>()?;
                items
            }
            None => {
                let sql = format!("{SELECT_COLUMNS} ORDER BY id");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_item)?;
                let items = rows.collect::<rusqlite::Result<Vec<_>>>()?;
                items
            }
        };
        Ok(items)
    }
}
