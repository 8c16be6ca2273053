pub mod export;
pub mod init;
pub mod menu;
pub mod playlist;
pub mod record;
pub mod report;
pub mod task;

use crate::libs::config::{Config, StoreBackend};
use crate::libs::messages::Message;
use crate::libs::scoring::ScoreError;
use crate::libs::tracker::Tracker;
use crate::msg_error;
use crate::store::Store;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage playlists")]
    Playlist(playlist::PlaylistArgs),
    #[command(about = "Record a practice session for a task")]
    Record(record::RecordArgs),
    #[command(about = "Show task statistics for a period")]
    Report(report::ReportArgs),
    #[command(about = "Export score history to CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Interactive menu")]
    Menu,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Document store to use instead of the configured one
    #[arg(long, global = true, value_enum)]
    store: Option<StoreBackend>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();

        let command = match cli.command {
            Commands::Init(args) => return init::cmd(args),
            command => command,
        };

        let config = Config::read()?;
        let mut store_config = config.store_config();
        if let Some(backend) = cli.store {
            store_config.backend = backend;
        }
        let tracker = Tracker::new(Store::open(&store_config)?, config.aggregator(None)?);

        match command {
            Commands::Init(_) => Ok(()),
            Commands::Task(args) => task::cmd(&tracker, args).await,
            Commands::Playlist(args) => playlist::cmd(&tracker, args).await,
            Commands::Record(args) => record::cmd(tracker, args).await,
            Commands::Report(args) => report::cmd(&tracker, args).await,
            Commands::Export(args) => export::cmd(&tracker, args).await,
            Commands::Menu => menu::cmd(&tracker).await,
        }
    }
}

/// Reports rejected input or a missing task and yields `None`.
///
/// One-shot commands stay non-fatal for these; every other error is passed on.
pub(crate) fn reported<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => match e.downcast_ref::<ScoreError>() {
            Some(ScoreError::InvalidInput(reason)) => {
                msg_error!(Message::InvalidInput(reason.clone()));
                Ok(None)
            }
            Some(ScoreError::UnknownTask(name)) => {
                msg_error!(Message::TaskNotFound(name.clone()));
                Ok(None)
            }
            None => Err(e),
        },
    }
}
