//! Core library modules: the scoring engine, the tracker service built on
//! top of it, configuration, and console/file output.
//!
//! ```rust,no_run
//! use aimtrack::libs::config::Config;
//! use aimtrack::libs::tracker::Tracker;
//! use aimtrack::store::Store;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let tracker = Tracker::new(Store::open(&config.store_config())?, config.aggregator(None)?);
//! for task in tracker.list_tasks().await? {
//!     println!("{}: {}", task.task_name, task.highscore);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod export;
pub mod messages;
pub mod scoring;
pub mod task;
pub mod tracker;
pub mod view;
