//! # aimtrack
//!
//! A command-line tracker for aim-training practice: tasks grouped into
//! playlists, per-session repetition scores, and derived statistics
//! (highscore, rolling average of the last 10 scores, achievement threshold,
//! period averages).
//!
//! ## Layout
//!
//! - [`libs::scoring`]: the pure score aggregation engine
//! - [`libs::tracker`]: task, playlist and session operations over a store
//! - [`store`]: the document store trait and its adapters ([`db`], [`api`])
//! - [`commands`]: clap subcommands and the interactive menu
//!
//! ```rust,no_run
//! use aimtrack::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
pub mod store;
