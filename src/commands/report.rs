use crate::{
    libs::{messages::Message, scoring::Period, tracker::Tracker, view::View},
    msg_info, msg_print,
    store::DocumentStore,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Window the period average is taken over
    #[arg(short, long, value_enum, default_value = "week")]
    period: Period,

    /// Only report the tasks of this playlist
    #[arg(long)]
    playlist: Option<String>,
}

pub async fn cmd<S: DocumentStore>(tracker: &Tracker<S>, args: ReportArgs) -> Result<()> {
    handle_report(tracker, args.period, args.playlist.as_deref()).await
}

/// Prints per-task statistics with the average over `period` ending today.
pub async fn handle_report<S: DocumentStore>(tracker: &Tracker<S>, period: Period, playlist: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let rows = tracker.report(period, playlist, today).await?;

    msg_print!(
        Message::ReportHeader {
            period: period.to_string(),
            date: today.format("%Y-%m-%d").to_string(),
        },
        true
    );
    if rows.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }
    View::report(&rows)
}
