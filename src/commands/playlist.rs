//! Playlist management command.
//!
//! Playlists only reference tasks by name; deleting a playlist never
//! deletes its tasks.

use crate::{
    libs::{messages::Message, task::parse_names, tracker::Tracker, view::View},
    msg_error, msg_info, msg_print, msg_success, msg_warning,
    store::DocumentStore,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct PlaylistArgs {
    #[command(subcommand)]
    command: PlaylistCommand,
}

#[derive(Debug, Subcommand)]
enum PlaylistCommand {
    /// Create a playlist from existing tasks
    Create {
        name: String,
        /// Comma-separated task names; unknown names are skipped
        #[arg(long)]
        tasks: Option<String>,
    },
    /// Rename a playlist and/or replace its tasks
    Edit {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        /// Comma-separated task names replacing the current list
        #[arg(long)]
        tasks: Option<String>,
    },
    /// Delete a playlist by name, or every playlist with --all
    Delete {
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },
    /// List all playlists
    List,
}

pub async fn cmd<S: DocumentStore>(tracker: &Tracker<S>, args: PlaylistArgs) -> Result<()> {
    match args.command {
        PlaylistCommand::Create { name, tasks } => handle_create(tracker, Some(name), tasks).await,
        PlaylistCommand::Edit { name, rename, tasks } => {
            // Flags given: no prompts for the parts left out.
            let interactive = rename.is_none() && tasks.is_none();
            handle_edit(tracker, Some(name), rename, tasks, interactive).await
        }
        PlaylistCommand::Delete { all: true, .. } => handle_delete_all(tracker).await,
        PlaylistCommand::Delete { name, .. } => handle_delete(tracker, name).await,
        PlaylistCommand::List => handle_list(tracker).await,
    }
}

/// Lets the user pick one of the stored playlists. `None` when there are none.
pub async fn select_playlist<S: DocumentStore>(tracker: &Tracker<S>) -> Result<Option<String>> {
    let playlists = tracker.list_playlists().await?;
    if playlists.is_empty() {
        msg_info!(Message::NoPlaylistsFound);
        return Ok(None);
    }

    let items: Vec<String> = playlists
        .iter()
        .map(|p| format!("{} ({})", p.playlist_name, p.tasks.join(", ")))
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectPlaylist.to_string())
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Some(playlists[selection].playlist_name.clone()))
}

fn report_skipped(skipped: Vec<String>) {
    if !skipped.is_empty() {
        msg_warning!(Message::UnknownTasksSkipped(skipped));
    }
}

pub async fn handle_create<S: DocumentStore>(tracker: &Tracker<S>, name: Option<String>, tasks: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPlaylistName.to_string())
            .interact_text()?,
    };

    if tracker.get_playlist(&name).await?.is_some() {
        msg_error!(Message::PlaylistAlreadyExists(name));
        return Ok(());
    }

    let tasks = match tasks {
        Some(tasks) => tasks,
        None => {
            super::task::handle_list(tracker).await?;
            Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPlaylistTasks.to_string())
                .allow_empty(true)
                .interact_text()?
        }
    };

    let change = match super::reported(tracker.create_playlist(&name, &parse_names(&tasks)).await)? {
        Some(change) => change,
        None => return Ok(()),
    };
    report_skipped(change.skipped);
    msg_success!(Message::PlaylistCreated(change.playlist.playlist_name, change.playlist.tasks));
    Ok(())
}

/// Renames and/or retasks a playlist. With `interactive`, missing values are prompted for
/// and an empty answer keeps the current value.
pub async fn handle_edit<S: DocumentStore>(
    tracker: &Tracker<S>,
    name: Option<String>,
    rename: Option<String>,
    tasks: Option<String>,
    interactive: bool,
) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => match select_playlist(tracker).await? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    if tracker.get_playlist(&name).await?.is_none() {
        msg_error!(Message::PlaylistNotFound(name));
        return Ok(());
    }

    let rename = match rename {
        Some(rename) => Some(rename),
        None if interactive => Some(
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptPlaylistNewName(name.clone()).to_string())
                .allow_empty(true)
                .interact_text()?,
        ),
        None => None,
    };

    let tasks = match tasks {
        Some(tasks) => Some(tasks),
        None if interactive => {
            super::task::handle_list(tracker).await?;
            Some(
                Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptPlaylistTasks.to_string())
                    .allow_empty(true)
                    .interact_text()?,
            )
        }
        None => None,
    };

    let tasks = tasks.map(|t| parse_names(&t));
    let change = match super::reported(tracker.edit_playlist(&name, rename.as_deref(), tasks.as_deref()).await)? {
        Some(change) => change,
        None => return Ok(()),
    };

    if change.playlist.playlist_name != name {
        msg_success!(Message::PlaylistRenamed(name, change.playlist.playlist_name.clone()));
    }
    report_skipped(change.skipped);
    msg_success!(Message::PlaylistUpdated(change.playlist.playlist_name, change.playlist.tasks));
    Ok(())
}

pub async fn handle_delete<S: DocumentStore>(tracker: &Tracker<S>, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => match select_playlist(tracker).await? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeletePlaylist(name.clone()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if tracker.delete_playlist(&name).await? {
        msg_success!(Message::PlaylistDeleted(name));
    } else {
        msg_error!(Message::PlaylistNotFound(name));
    }
    Ok(())
}

pub async fn handle_delete_all<S: DocumentStore>(tracker: &Tracker<S>) -> Result<()> {
    let count = tracker.list_playlists().await?.len();
    if count == 0 {
        msg_info!(Message::NoPlaylistsFound);
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteAllPlaylists(count).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let deleted = tracker.delete_all_playlists().await?;
    msg_success!(Message::AllPlaylistsDeleted(deleted));
    Ok(())
}

pub async fn handle_list<S: DocumentStore>(tracker: &Tracker<S>) -> Result<()> {
    let playlists = tracker.list_playlists().await?;
    if playlists.is_empty() {
        msg_info!(Message::NoPlaylistsFound);
        return Ok(());
    }

    msg_print!(Message::PlaylistsHeader, true);
    View::playlists(&playlists)
}
