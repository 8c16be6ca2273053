//! Document store boundary.
//!
//! Task and playlist records are stored as JSON documents grouped into
//! collections and keyed by name. Every document carries a `revision` that
//! increases on each write, which gives callers an optimistic concurrency
//! check: a merge that names an expected revision fails with
//! [`StoreError::Conflict`] when someone else wrote first.
//!
//! ## Adapters
//!
//! - [`SqliteStore`](crate::db::documents::SqliteStore): local document table (default)
//! - [`RemoteStore`](crate::api::remote::RemoteStore): JSON document API over HTTP
//! - [`MemoryStore`](memory::MemoryStore): in-process map for tests and dry runs
//!
//! [`Store`] dispatches to whichever adapter the configuration selects.
//!
//! ```rust,no_run
//! use aimtrack::libs::config::Config;
//! use aimtrack::store::{DocumentStore, Store, TASKS};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Store::open(&Config::read()?.store_config())?;
//! let tasks = store.list(TASKS).await?;
//! # Ok(())
//! # }
//! ```

pub mod memory;

use crate::api::remote::RemoteStore;
use crate::db::documents::SqliteStore;
use crate::libs::config::{StoreBackend, StoreConfig};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use memory::MemoryStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Collection holding one document per task, keyed by task name.
pub const TASKS: &str = "tasks";

/// Collection holding one document per playlist, keyed by playlist name.
pub const PLAYLISTS: &str = "playlists";

/// Top-level fields of a document body.
pub type Fields = Map<String, Value>;

/// A stored document with its concurrency revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub revision: u64,
    #[serde(default)]
    pub fields: Fields,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document '{collection}/{id}' not found")]
    NotFound { collection: String, id: String },

    #[error("document '{collection}/{id}' already exists")]
    AlreadyExists { collection: String, id: String },

    #[error("revision conflict on '{collection}/{id}': expected {expected}, found {actual}")]
    Conflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response status {status} for '{collection}/{id}'")]
    Status { status: u16, collection: String, id: String },

    #[error("malformed document: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn already_exists(collection: &str, id: &str) -> Self {
        StoreError::AlreadyExists {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn conflict(collection: &str, id: &str, expected: u64, actual: u64) -> Self {
        StoreError::Conflict {
            collection: collection.to_string(),
            id: id.to_string(),
            expected,
            actual,
        }
    }
}

/// Shallow merge: every top-level field in `patch` replaces the one in `target`.
///
/// Fields absent from `patch` are left untouched.
pub fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

/// Collection-of-documents storage with optimistic revisions.
///
/// Implementations must apply `merge` atomically per document: the revision
/// check, the field merge and the revision bump happen as one step.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Fetches a single document, `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Lists every document in a collection ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Creates a document at revision 1. Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Merges `fields` into an existing document and bumps its revision.
    ///
    /// With `expected_revision` set, the write only happens if the stored
    /// revision still matches.
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        expected_revision: Option<u64>,
    ) -> Result<Document, StoreError>;

    /// Deletes a document. Returns `false` when there was nothing to delete.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}

/// The configured document store adapter.
pub enum Store {
    Local(SqliteStore),
    Remote(RemoteStore),
    Memory(MemoryStore),
}

impl Store {
    /// Opens the adapter selected in `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let store = match config.backend {
            StoreBackend::Local => Store::Local(SqliteStore::new()?),
            StoreBackend::Remote => {
                if config.api_url.trim().is_empty() {
                    return Err(msg_error_anyhow!(Message::RemoteStoreUrlMissing));
                }
                Store::Remote(RemoteStore::new(config)?)
            }
            StoreBackend::Memory => Store::Memory(MemoryStore::new()),
        };
        tracing::debug!(backend = ?config.backend, "document store opened");
        Ok(store)
    }
}

impl DocumentStore for Store {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        match self {
            Store::Local(store) => store.get(collection, id).await,
            Store::Remote(store) => store.get(collection, id).await,
            Store::Memory(store) => store.get(collection, id).await,
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        match self {
            Store::Local(store) => store.list(collection).await,
            Store::Remote(store) => store.list(collection).await,
            Store::Memory(store) => store.list(collection).await,
        }
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError> {
        match self {
            Store::Local(store) => store.create(collection, id, fields).await,
            Store::Remote(store) => store.create(collection, id, fields).await,
            Store::Memory(store) => store.create(collection, id, fields).await,
        }
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        expected_revision: Option<u64>,
    ) -> Result<Document, StoreError> {
        match self {
            Store::Local(store) => store.merge(collection, id, fields, expected_revision).await,
            Store::Remote(store) => store.merge(collection, id, fields, expected_revision).await,
            Store::Memory(store) => store.merge(collection, id, fields, expected_revision).await,
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        match self {
            Store::Local(store) => store.delete(collection, id).await,
            Store::Remote(store) => store.delete(collection, id).await,
            Store::Memory(store) => store.delete(collection, id).await,
        }
    }
}
