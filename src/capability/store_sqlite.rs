//! Default `EntryStore` backed by SQLite + FTS5 (feature `sqlite-store`).
//!
//! Generalised connection setup and FTS5 query shape onto a configurable
//! `entries`/`fts` schema with column names taken from `EngineConfig`.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::config::EngineConfig;
use crate::error::{Result, SearchError};
use crate::types::{Entry, QuestionMap};

use super::store::EntryStore;

/// SQLite-backed entry store. Table and column names come from
/// [`EngineConfig`], not user input, so they are interpolated directly
/// into SQL as trusted schema identifiers.
pub struct SqliteEntryStore {
    conn: Connection,
    config: EngineConfig,
}

impl SqliteEntryStore {
    /// Open (or create) a database at `path` and ensure the entries/FTS
    /// schema exists. Use `":memory:"` for an ephemeral store.
    pub fn open(path: &str, config: EngineConfig) -> Result<Self> {
        let conn = Connection::open(path).map_err(sql_err)?;
        let store = Self { conn, config };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory database, already populated with `entries`.
    pub fn in_memory(config: EngineConfig, entries: &[Entry]) -> Result<Self> {
        let mut store = Self::open(":memory:", config)?;
        store.insert_entries(entries)?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        let cfg = &self.config;
        self.conn
            .execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    {id} INTEGER PRIMARY KEY,
                    {category} TEXT NOT NULL,
                    {question} TEXT NOT NULL,
                    {answer} TEXT NOT NULL
                );
                CREATE VIRTUAL TABLE IF NOT EXISTS {fts} USING fts5(
                    {question}, content='{table}', content_rowid='{id}'
                );",
                table = cfg.table_name,
                fts = cfg.fts_table_name,
                id = cfg.id_column,
                category = cfg.category_column,
                question = cfg.question_column,
                answer = cfg.answer_column,
            ))
            .map_err(sql_err)
    }

    /// Insert entries and keep the FTS index in sync. Intended for tests
    /// and small fixture corpora — bulk loading is out of this crate's
    /// scope.
    pub fn insert_entries(&mut self, entries: &[Entry]) -> Result<()> {
        let cfg = self.config.clone();
        let tx = self.conn.transaction().map_err(sql_err)?;
        {
            let mut insert_entry = tx
                .prepare(&format!(
                    "INSERT INTO {table} ({id}, {category}, {question}, {answer}) VALUES (?, ?, ?, ?)",
                    table = cfg.table_name,
                    id = cfg.id_column,
                    category = cfg.category_column,
                    question = cfg.question_column,
                    answer = cfg.answer_column,
                ))
                .map_err(sql_err)?;
            let mut insert_fts = tx
                .prepare(&format!(
                    "INSERT INTO {fts} (rowid, {question}) VALUES (?, ?)",
                    fts = cfg.fts_table_name,
                    question = cfg.question_column,
                ))
                .map_err(sql_err)?;

            for e in entries {
                insert_entry
                    .execute(rusqlite::params![e.id, e.category, e.question, e.answer])
                    .map_err(sql_err)?;
                insert_fts
                    .execute(rusqlite::params![e.id, e.question])
                    .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)
    }
}

impl EntryStore for SqliteEntryStore {
    fn entry_count(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.config.table_name);
        self.conn
            .query_row(&sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n as usize)
            .map_err(sql_err)
    }

    fn load_questions(&self) -> Result<QuestionMap> {
        let sql = format!(
            "SELECT {id}, {question} FROM {table}",
            id = self.config.id_column,
            question = self.config.question_column,
            table = self.config.table_name,
        );
        let mut stmt = self.conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let question: String = row.get(1)?;
                Ok((id as u32, question))
            })
            .map_err(sql_err)?;

        let mut map: HashMap<u32, String> = HashMap::new();
        for row in rows {
            let (id, question) = row.map_err(sql_err)?;
            map.insert(id, question);
        }
        Ok(map)
    }

    fn fts_match(&self, expr: &str, limit: usize) -> Result<Vec<u32>> {
        let sql = format!(
            "SELECT rowid FROM {fts} WHERE {fts} MATCH ?1 ORDER BY rank LIMIT ?2",
            fts = self.config.fts_table_name,
        );
        let mut stmt = self.conn.prepare(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(rusqlite::params![expr, limit as i64], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(sql_err)?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(sql_err)? as u32);
        }
        Ok(ids)
    }

    fn fetch_entries(&self, ids: &[u32]) -> Result<Vec<Entry>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {id}, {category}, {question}, {answer} FROM {table} WHERE {id} IN ({placeholders})",
            id = self.config.id_column,
            category = self.config.category_column,
            question = self.config.question_column,
            answer = self.config.answer_column,
            table = self.config.table_name,
        );
        let mut stmt = self.conn.prepare(&sql).map_err(sql_err)?;
        let params: Vec<&dyn rusqlite::ToSql> = ids
            .iter()
            .map(|id| id as &dyn rusqlite::ToSql)
            .collect();

        let rows = stmt
            .query_map(params.as_slice(), |row| {
                let id: i64 = row.get(0)?;
                Ok(Entry {
                    id: id as u32,
                    category: row.get(1)?,
                    question: row.get(2)?,
                    answer: row.get(3)?,
                })
            })
            .map_err(sql_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(sql_err)?);
        }
        Ok(entries)
    }

    fn close(&mut self) -> Result<()> {
        // `Connection` closes on drop; nothing to do eagerly, but the
        // method exists so callers don't need to know that.
        Ok(())
    }
}

fn sql_err(e: rusqlite::Error) -> SearchError {
    SearchError::Store(e.to_string())
}
