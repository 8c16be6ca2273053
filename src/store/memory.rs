//! In-process document store.
//!
//! Keeps documents in a `BTreeMap` keyed by `(collection, id)` behind a
//! mutex. Nothing is persisted; used by tests and `--store memory` runs.

use super::{merge_fields, Document, DocumentStore, Fields, StoreError};
use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<(String, String), Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let documents = self.documents.lock();
        Ok(documents.get(&(collection.to_string(), id.to_string())).cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let documents = self.documents.lock();
        Ok(documents
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|(_, document)| document.clone())
            .collect())
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError> {
        let mut documents = self.documents.lock();
        let key = (collection.to_string(), id.to_string());
        if documents.contains_key(&key) {
            return Err(StoreError::already_exists(collection, id));
        }

        let document = Document {
            id: id.to_string(),
            revision: 1,
            fields,
        };
        documents.insert(key, document.clone());
        Ok(document)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        expected_revision: Option<u64>,
    ) -> Result<Document, StoreError> {
        let mut documents = self.documents.lock();
        let document = documents
            .get_mut(&(collection.to_string(), id.to_string()))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        if let Some(expected) = expected_revision {
            if expected != document.revision {
                return Err(StoreError::conflict(collection, id, expected, document.revision));
            }
        }

        merge_fields(&mut document.fields, fields);
        document.revision += 1;
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.lock();
        Ok(documents.remove(&(collection.to_string(), id.to_string())).is_some())
    }
}
