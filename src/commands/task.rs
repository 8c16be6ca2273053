//! Task management command.
//!
//! Creates, edits, lists and deletes practice tasks. Missing arguments are
//! asked for interactively.

use crate::{
    libs::{messages::Message, task::Task, tracker::Tracker, view::View},
    msg_error, msg_info, msg_print, msg_success,
    store::DocumentStore,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task with an initial highscore
    Create {
        name: String,
        /// Initial highscore (positive integer)
        #[arg(long)]
        highscore: Option<i64>,
    },
    /// Set a new highscore for a task
    Edit {
        name: String,
        #[arg(long)]
        highscore: Option<i64>,
    },
    /// Delete a task by name, or every task with --all
    Delete {
        name: Option<String>,
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },
    /// List all tasks, or the tasks of one playlist
    List {
        #[arg(short, long)]
        playlist: Option<String>,
    },
}

pub async fn cmd<S: DocumentStore>(tracker: &Tracker<S>, args: TaskArgs) -> Result<()> {
    match args.command {
        TaskCommand::Create { name, highscore } => handle_create(tracker, Some(name), highscore).await,
        TaskCommand::Edit { name, highscore } => handle_edit(tracker, Some(name), highscore).await,
        TaskCommand::Delete { all: true, .. } => handle_delete_all(tracker).await,
        TaskCommand::Delete { name, .. } => handle_delete(tracker, name).await,
        TaskCommand::List { playlist: Some(playlist) } => handle_list_playlist(tracker, Some(playlist)).await,
        TaskCommand::List { playlist: None } => handle_list(tracker).await,
    }
}

fn prompt_highscore(prompt: Message) -> Result<i64> {
    let range_msg = Message::TaskHighscoreRange.to_string();
    let highscore = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .validate_with(|input: &i64| -> Result<(), &str> {
            if *input > 0 {
                Ok(())
            } else {
                Err(&range_msg)
            }
        })
        .interact_text()?;
    Ok(highscore)
}

/// Lets the user pick one of the stored tasks. `None` when there are none.
pub async fn select_task<S: DocumentStore>(tracker: &Tracker<S>) -> Result<Option<String>> {
    let names = tracker.task_names().await?;
    if names.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(None);
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectTask.to_string())
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Some(names[selection].clone()))
}

pub async fn handle_create<S: DocumentStore>(tracker: &Tracker<S>, name: Option<String>, highscore: Option<i64>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskName.to_string())
            .interact_text()?,
    };

    if tracker.get_task(&name).await?.is_some() {
        msg_error!(Message::TaskAlreadyExists(name));
        return Ok(());
    }

    let highscore = match highscore {
        Some(highscore) => highscore,
        None => prompt_highscore(Message::PromptInitialHighscore(name.clone()))?,
    };

    if let Some(task) = super::reported(tracker.create_task(&name, highscore).await)? {
        msg_success!(Message::TaskCreated(task.task_name));
    }
    Ok(())
}

pub async fn handle_edit<S: DocumentStore>(tracker: &Tracker<S>, name: Option<String>, highscore: Option<i64>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => match select_task(tracker).await? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    if tracker.get_task(&name).await?.is_none() {
        msg_error!(Message::TaskNotFound(name));
        return Ok(());
    }

    let highscore = match highscore {
        Some(highscore) => highscore,
        None => prompt_highscore(Message::PromptNewHighscore(name.clone()))?,
    };

    if super::reported(tracker.edit_task(&name, highscore).await)?.is_some() {
        msg_success!(Message::TaskUpdated(name));
    }
    Ok(())
}

pub async fn handle_delete<S: DocumentStore>(tracker: &Tracker<S>, name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => match select_task(tracker).await? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteTask(name.clone()).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if tracker.delete_task(&name).await? {
        msg_success!(Message::TaskDeleted(name));
    } else {
        msg_error!(Message::TaskNotFound(name));
    }
    Ok(())
}

pub async fn handle_delete_all<S: DocumentStore>(tracker: &Tracker<S>) -> Result<()> {
    let count = tracker.task_names().await?.len();
    if count == 0 {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmDeleteAllTasks(count).to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let deleted = tracker.delete_all_tasks().await?;
    msg_success!(Message::AllTasksDeleted(deleted));
    Ok(())
}

pub async fn handle_list<S: DocumentStore>(tracker: &Tracker<S>) -> Result<()> {
    let tasks: Vec<Task> = tracker.list_tasks().await?;
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks)
}

/// Shows the tasks of `playlist`, asking for one when not given.
pub async fn handle_list_playlist<S: DocumentStore>(tracker: &Tracker<S>, playlist: Option<String>) -> Result<()> {
    let playlist = match playlist {
        Some(playlist) => playlist,
        None => match super::playlist::select_playlist(tracker).await? {
            Some(playlist) => playlist,
            None => return Ok(()),
        },
    };

    if tracker.get_playlist(&playlist).await?.is_none() {
        msg_error!(Message::PlaylistNotFound(playlist));
        return Ok(());
    }

    let tasks = tracker.playlist_tasks(&playlist).await?;
    msg_print!(Message::TasksInPlaylistHeader(playlist), true);
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }
    View::playlist_tasks(&tasks)
}
