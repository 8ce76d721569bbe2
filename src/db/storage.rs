//! Local key-value storage.
//!
//! A single table holding JSON-encoded values under string keys. Every write
//! replaces the whole value for its key; there are no partial updates, so a
//! reader always sees either the previous or the new value.

use super::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA_STORAGE: &str = "CREATE TABLE IF NOT EXISTS storage (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
);";
const SELECT_VALUE: &str = "SELECT value FROM storage WHERE key = ?";
const UPSERT_VALUE: &str = "INSERT INTO storage (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_VALUE: &str = "DELETE FROM storage WHERE key = ?";

pub struct Storage {
    pub conn: Connection,
}

impl Storage {
    /// Opens the storage table in the application database.
    pub fn new() -> Result<Storage> {
        Self::from_db(Db::new()?)
    }

    /// Opens a throwaway in-memory store.
    pub fn in_memory() -> Result<Storage> {
        Self::from_db(Db::in_memory()?)
    }

    pub fn from_db(db: Db) -> Result<Storage> {
        db.conn.execute(SCHEMA_STORAGE, [])?;
        Ok(Storage { conn: db.conn })
    }

    /// Raw stored text for `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.conn.query_row(SELECT_VALUE, params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute(DELETE_VALUE, params![key])?;
        Ok(())
    }
}
