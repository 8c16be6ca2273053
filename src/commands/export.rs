//! Score history export command.
//!
//! Writes every recorded score (date, playlist, task, score, sensitivity)
//! to a CSV or JSON file for analysis elsewhere.

use crate::{
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
        tracker::Tracker,
    },
    msg_info, msg_success,
    store::DocumentStore,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file. Defaults to `aimtrack_export_<timestamp>.<ext>`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only export the tasks of this playlist
    #[arg(long)]
    playlist: Option<String>,
}

pub async fn cmd<S: DocumentStore>(tracker: &Tracker<S>, args: ExportArgs) -> Result<()> {
    let rows = tracker.export_rows(args.playlist.as_deref()).await?;
    if rows.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    let exporter = Exporter::new(args.format, args.output);
    exporter.write(&rows)?;
    msg_success!(Message::DataExported(exporter.output_path().display().to_string()));
    Ok(())
}
