//! Remote document store client.
//!
//! Speaks a small JSON document API rooted at `api_url`:
//!
//! | Operation | Request                                   | Success | Failure           |
//! |-----------|-------------------------------------------|---------|-------------------|
//! | list      | `GET    {base}/{collection}`              | 200     |                   |
//! | get       | `GET    {base}/{collection}/{id}`         | 200     | 404 → `None`      |
//! | create    | `POST   {base}/{collection}/{id}`         | 201     | 409 AlreadyExists |
//! | merge     | `PATCH  {base}/{collection}/{id}`         | 200     | 404, 412 Conflict |
//! | delete    | `DELETE {base}/{collection}/{id}`         | 204     | 404 → `false`     |
//!
//! Collection and id are percent-encoded as single path segments, so ids
//! may contain `#`, `?` or spaces. Request bodies are `{"fields": {...}}`.
//! A merge with an expected revision sends it as `If-Match`; the server
//! answers 412 when the stored revision differs and may report the current
//! one in an `ETag` header.

use crate::libs::config::StoreConfig;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use crate::store::{Document, DocumentStore, Fields, StoreError};
use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct FieldsBody<'a> {
    fields: &'a Fields,
}

#[derive(Debug)]
pub struct RemoteStore {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RemoteStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        let auth_token = Some(config.auth_token.trim().to_string()).filter(|token| !token.is_empty());

        let base_url = Url::parse(config.api_url.trim())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| msg_error_anyhow!(Message::RemoteStoreUrlInvalid(config.api_url.clone())))?;

        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always editable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self, collection: &str) -> Url {
        self.url(&[collection])
    }

    fn document_url(&self, collection: &str, id: &str) -> Url {
        self.url(&[collection, id])
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        Ok(self.authorize(request).send().await?)
    }
}

fn unexpected(response: &Response, collection: &str, id: &str) -> StoreError {
    StoreError::Status {
        status: response.status().as_u16(),
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

/// Current revision reported by the server on a 412, 0 when absent.
fn reported_revision(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::ETAG)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim_matches('"').parse().ok())
        .unwrap_or(0)
}

impl DocumentStore for RemoteStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let response = self.send(self.client.get(self.document_url(collection, id))).await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<Document>().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(unexpected(&response, collection, id)),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let response = self.send(self.client.get(self.collection_url(collection))).await?;
        if response.status() != StatusCode::OK {
            return Err(unexpected(&response, collection, ""));
        }

        let mut documents = response.json::<Vec<Document>>().await?;
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<Document, StoreError> {
        let request = self.client.post(self.document_url(collection, id)).json(&FieldsBody { fields: &fields });
        let response = self.send(request).await?;
        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                tracing::debug!(collection, id, "remote document created");
                Ok(response.json::<Document>().await?)
            }
            StatusCode::CONFLICT => Err(StoreError::already_exists(collection, id)),
            _ => Err(unexpected(&response, collection, id)),
        }
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
        expected_revision: Option<u64>,
    ) -> Result<Document, StoreError> {
        let mut request = self.client.patch(self.document_url(collection, id)).json(&FieldsBody { fields: &fields });
        if let Some(revision) = expected_revision {
            request = request.header(reqwest::header::IF_MATCH, revision.to_string());
        }

        let response = self.send(request).await?;
        match response.status() {
            StatusCode::OK => {
                let document = response.json::<Document>().await?;
                tracing::debug!(collection, id, revision = document.revision, "remote document merged");
                Ok(document)
            }
            StatusCode::NOT_FOUND => Err(StoreError::not_found(collection, id)),
            StatusCode::PRECONDITION_FAILED => Err(StoreError::conflict(
                collection,
                id,
                expected_revision.unwrap_or(0),
                reported_revision(&response),
            )),
            _ => Err(unexpected(&response, collection, id)),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let response = self.send(self.client.delete(self.document_url(collection, id))).await?;
        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(unexpected(&response, collection, id)),
        }
    }
}
