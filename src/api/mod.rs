//! HTTP clients for external services.
//!
//! ```rust,no_run
//! use aimtrack::api::remote::RemoteStore;
//! use aimtrack::libs::config::{StoreBackend, StoreConfig};
//!
//! let config = StoreConfig {
//!     backend: StoreBackend::Remote,
//!     api_url: "https://scores.example.com/api".to_string(),
//!     ..StoreConfig::default()
//! };
//! let store = RemoteStore::new(&config)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Remote document store speaking a JSON document API.
pub mod remote;
