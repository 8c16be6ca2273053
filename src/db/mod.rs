//! SQLite persistence for the local document store.
//!
//! ```rust,no_run
//! use aimtrack::db::documents::SqliteStore;
//! use aimtrack::store::{DocumentStore, TASKS};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = SqliteStore::new()?;
//! let tasks = store.list(TASKS).await?;
//! # Ok(())
//! # }
//! ```

/// Connection setup and database file location.
pub mod db;

/// Versioned schema changes tracked in the `migrations` table.
pub mod migrations;

/// [`DocumentStore`](crate::store::DocumentStore) implementation over the `documents` table.
pub mod documents;
