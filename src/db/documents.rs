//! Local document store backed by the `documents` table.
//!
//! Each row holds one document body as JSON text together with its
//! revision. Writes that touch an existing document run in a transaction so
//! the revision check and the update cannot interleave with another writer.

use crate::db::db::Db;
use crate::store::{merge_fields, Document, DocumentStore, Fields, StoreError};
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SELECT_DOCUMENT: &str = "SELECT id, revision, body FROM documents WHERE collection = ?1 AND id = ?2";
const SELECT_COLLECTION: &str = "SELECT id, revision, body FROM documents WHERE collection = ?1 ORDER BY id";
const INSERT_DOCUMENT: &str = "INSERT INTO documents (collection, id, revision, body, updated_at)
    VALUES (?1, ?2, 1, ?3, CURRENT_TIMESTAMP)";
const UPDATE_DOCUMENT: &str = "UPDATE documents SET revision = ?3, body = ?4, updated_at = CURRENT_TIMESTAMP
    WHERE collection = ?1 AND id = ?2";
const DELETE_DOCUMENT: &str = "DELETE FROM documents WHERE collection = ?1 AND id = ?2";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens the store in the application data directory.
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { conn: Mutex::new(db.conn) })
    }

    /// Opens the store on a specific database file.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Db::open(path)?;
        Ok(Self { conn: Mutex::new(db.conn) })
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, i64, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn into_document((id, revision, body): (String, i64, String)) -> Result<Document, StoreError> {
    let fields: Fields = serde_json::from_str(&body)?;
    Ok(Document {
        id,
        revision: revision as u64,
        fields,
    })
}

impl DocumentStore for SqliteStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let conn = self.conn.lock();
        let row = conn.query_row(SELECT_DOCUMENT, params![collection, id], read_row).optional()?;
        row.map(into_document).transpose()
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_COLLECTION)?;
        let rows = stmt.query_map(params![collection], read_row)?;

        let mut documents = Vec::new();
        for row in rows {
            documents.push(into_document(row?)?);
        }
        Ok(documents)
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let exists = tx.query_row(SELECT_DOCUMENT, params![collection, id], read_row).optional()?;
        if exists.is_some() {
            return Err(StoreError::already_exists(collection, id));
        }

        let body = serde_json::to_string(&fields)?;
        tx.execute(INSERT_DOCUMENT, params![collection, id, body])?;
        tx.commit()?;

        tracing::debug!(collection, id, "document created");
        Ok(Document {
            id: id.to_string(),
            revision: 1,
            fields,
        })
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        expected_revision: Option<u64>,
    ) -> Result<Document, StoreError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let row = tx
            .query_row(SELECT_DOCUMENT, params![collection, id], read_row)
            .optional()?
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let mut document = into_document(row)?;

        if let Some(expected) = expected_revision {
            if expected != document.revision {
                return Err(StoreError::conflict(collection, id, expected, document.revision));
            }
        }

        merge_fields(&mut document.fields, fields);
        document.revision += 1;

        let body = serde_json::to_string(&document.fields)?;
        tx.execute(UPDATE_DOCUMENT, params![collection, id, document.revision as i64, body])?;
        tx.commit()?;

        tracing::debug!(collection, id, revision = document.revision, "document merged");
        Ok(document)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock();
        let affected = conn.execute(DELETE_DOCUMENT, params![collection, id])?;
        Ok(affected > 0)
    }
}
